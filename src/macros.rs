//! Macros for typed actions and function composition.

/// Declare an action enum and implement [`Action`](crate::core::Action) for it.
///
/// Each variant's name becomes its action type. A `Reserved(String)`
/// variant is added so the store can send its own INIT and REPLACE actions
/// to reducers written against the enum; reducers should fall through to
/// the current state for it.
///
/// # Example
///
/// ```
/// use redstore::action_enum;
/// use redstore::core::{Action, Reducer};
/// use redstore::store::create_store;
///
/// action_enum! {
///     pub enum CounterAction {
///         Increment,
///         Add(i64),
///         Reset,
///     }
/// }
///
/// let reducer = Reducer::new(|state: Option<&i64>, action: &CounterAction| {
///     let state = state.copied().unwrap_or(0);
///     match action {
///         CounterAction::Increment => state + 1,
///         CounterAction::Add(by) => state + by,
///         CounterAction::Reset => 0,
///         CounterAction::Reserved(_) => state,
///     }
/// });
///
/// let store = create_store(reducer, None).unwrap();
/// store.dispatch(CounterAction::Add(41)).unwrap();
/// store.dispatch(CounterAction::Increment).unwrap();
///
/// assert_eq!(store.get_state().unwrap(), 42);
/// assert_eq!(CounterAction::Reset.action_type(), Some("Reset"));
/// ```
#[macro_export]
macro_rules! action_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $(( $($field:ty),* $(,)? ))?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, PartialEq, Debug, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant $(( $($field),* ))?,
            )*
            /// One of the store's reserved action types.
            Reserved(String),
        }

        impl $crate::core::Action for $name {
            fn action_type(&self) -> Option<&str> {
                match self {
                    $(Self::$variant { .. } => Some(stringify!($variant)),)*
                    Self::Reserved(action_type) => Some(action_type.as_str()),
                }
            }

            fn reserved(action_type: &str) -> Self {
                Self::Reserved(action_type.to_string())
            }
        }
    };
}

/// Compose functions right to left.
///
/// `compose!(f, g, h)` is `move |x| f(g(h(x)))`. With no arguments it is
/// the identity, and a single function is returned unchanged. For a runtime
/// list of boxed functions use [`compose`](crate::middleware::compose).
///
/// # Example
///
/// ```
/// use redstore::compose;
///
/// let add_one = |x: i32| x + 1;
/// let double = |x: i32| x * 2;
///
/// let composed = compose!(add_one, double);
/// assert_eq!(composed(5), 11);
/// ```
#[macro_export]
macro_rules! compose {
    () => {
        |x| x
    };
    ($f:expr $(,)?) => {
        $f
    };
    ($f:expr, $($rest:expr),+ $(,)?) => {{
        let outer = $f;
        let inner = $crate::compose!($($rest),+);
        move |x| outer(inner(x))
    }};
}

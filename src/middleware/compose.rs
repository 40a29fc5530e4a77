//! Right-to-left function composition.

/// A boxed unary function.
pub type Unary<T> = Box<dyn Fn(T) -> T>;

/// Compose unary functions right to left.
///
/// `compose(vec![f, g, h])(x)` is `f(g(h(x)))`. With no functions the
/// result is the identity; a single function is returned unchanged.
///
/// # Example
///
/// ```rust
/// use redstore::middleware::{compose, Unary};
///
/// let add_one: Unary<i32> = Box::new(|x| x + 1);
/// let double: Unary<i32> = Box::new(|x| x * 2);
///
/// assert_eq!(compose(vec![add_one, double])(5), 11);
/// assert_eq!(compose::<i32>(vec![])(5), 5);
/// ```
pub fn compose<T: 'static>(funcs: Vec<Unary<T>>) -> Unary<T> {
    let mut funcs = funcs.into_iter();
    let Some(first) = funcs.next() else {
        return Box::new(|arg| arg);
    };
    funcs.fold(first, |outer, inner| -> Unary<T> {
        Box::new(move |arg| outer(inner(arg)))
    })
}

/// Compose unary functions around an innermost function of any input type.
///
/// Only the innermost function sees the original arguments; pass a tuple to
/// give it several.
///
/// # Example
///
/// ```rust
/// use redstore::middleware::{compose_with, Unary};
///
/// let negate: Unary<i32> = Box::new(|x| -x);
/// let f = compose_with(vec![negate], |(a, b): (i32, i32)| a * b);
///
/// assert_eq!(f((3, 4)), -12);
/// ```
pub fn compose_with<Args, T, F>(outer: Vec<Unary<T>>, innermost: F) -> Box<dyn Fn(Args) -> T>
where
    T: 'static,
    F: Fn(Args) -> T + 'static,
{
    let outer = compose(outer);
    Box::new(move |args| outer(innermost(args)))
}

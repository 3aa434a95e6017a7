//! Parameter bags declared as structs.

use crate::{FxxResult, ParamBag, Slot};

/// A struct whose fields form a parameter bag.
///
/// Usually derived with `#[derive(Params)]`, which reads `#[fxx(name = "...")]`,
/// `#[fxx(group = "...")]` and `#[fxx(optional)]` from each field:
///
/// ```
/// use std::sync::Arc;
/// use fxx::Params;
///
/// struct Connection;
/// struct Handler;
///
/// #[derive(Params)]
/// struct ServerParams {
///     #[fxx(name = "ro")]
///     read_only: Arc<Connection>,
///     #[fxx(group = "handlers")]
///     handlers: Vec<Arc<Handler>>,
/// }
///
/// let slots = <ServerParams as fxx::Params>::slots();
/// assert_eq!(slots.len(), 2);
/// assert_eq!(slots[0].tag().map(ToString::to_string).as_deref(), Some(r#"name:"ro""#));
/// ```
pub trait Params: Sized + Send + 'static {
    /// Slot descriptors, one per field in declaration order.
    fn slots() -> Vec<Slot>;

    /// Build the struct from a bag resolved for [`Params::slots`].
    ///
    /// # Errors
    ///
    /// Returns an error when a field is missing or has the wrong type.
    fn from_bag(bag: &mut ParamBag) -> FxxResult<Self>;
}

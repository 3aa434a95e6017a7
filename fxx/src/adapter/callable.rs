//! Positional function signatures an adapter can wrap.

use crate::{Dependency, FxxResult, ParamBag, SlotType};

/// A function whose parameters are all [`Dependency`] slot shapes.
///
/// Implemented for `Fn` closures and function items of arity 0 through 8.
/// `Args` is the tuple of parameter types and only exists to keep the
/// per-arity implementations apart.
pub trait Callable<Args>: Send + Sync + 'static {
    /// Value returned by the function, forwarded unchanged by the adapter.
    type Output;

    /// One slot type per parameter, in order.
    fn slot_types() -> Vec<SlotType>;

    /// Take the fields out of `bag` positionally and call the function.
    ///
    /// # Errors
    ///
    /// Returns an error when a field is missing or has the wrong type.
    fn call(&self, bag: &mut ParamBag) -> FxxResult<Self::Output>;
}

impl<Func, Out> Callable<()> for Func
where
    Func: Fn() -> Out + Send + Sync + 'static,
{
    type Output = Out;

    fn slot_types() -> Vec<SlotType> {
        Vec::new()
    }

    fn call(&self, _bag: &mut ParamBag) -> FxxResult<Out> {
        Ok(self())
    }
}

macro_rules! impl_callable {
    ($($ty:ident $value:ident $index:literal),+) => {
        impl<Func, Out, $($ty,)+> Callable<($($ty,)+)> for Func
        where
            Func: Fn($($ty),+) -> Out + Send + Sync + 'static,
            $($ty: Dependency,)+
        {
            type Output = Out;

            fn slot_types() -> Vec<SlotType> {
                vec![$(SlotType::of::<$ty>()),+]
            }

            fn call(&self, bag: &mut ParamBag) -> FxxResult<Out> {
                $(let $value = bag.take::<$ty>($index)?;)+
                Ok(self($($value),+))
            }
        }
    };
}

impl_callable!(A0 a0 0);
impl_callable!(A0 a0 0, A1 a1 1);
impl_callable!(A0 a0 0, A1 a1 1, A2 a2 2);
impl_callable!(A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3);
impl_callable!(A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4);
impl_callable!(A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5);
impl_callable!(A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5, A6 a6 6);
impl_callable!(A0 a0 0, A1 a1 1, A2 a2 2, A3 a3 3, A4 a4 4, A5 a5 5, A6 a6 6, A7 a7 7);

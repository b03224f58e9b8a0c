//! Interrupt controller abstraction

/// Global signal-delivery gate
pub trait InterruptControl {
    /// Allow expiry handlers to run. Delivery stays enabled afterwards.
    fn enable_global(&mut self);

    fn is_enabled(&self) -> bool;
}

impl<I: InterruptControl + ?Sized> InterruptControl for &mut I {
    fn enable_global(&mut self) {
        (**self).enable_global();
    }

    fn is_enabled(&self) -> bool {
        (**self).is_enabled()
    }
}

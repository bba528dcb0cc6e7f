use embedded_hal::digital::{Error as _, OutputPin, PinState};

use crate::Result;
use crate::error::Error::PinOutOfRange;
use crate::pins::OutputPins;

/// Array of `embedded_hal` output pins, addressed by index.
///
/// Lets the drivers run on any HAL: build the typed pins the usual way, then hand the array to a
/// [`DirectPins`](crate::DirectPins) or a [`ShiftRegister`](crate::ShiftRegister). Pin ids are the
/// array indexes.
pub struct OutputArray<P, const N: usize>([P; N]);

impl<P: OutputPin, const N: usize> OutputArray<P, N> {
    pub const fn new(outputs: [P; N]) -> Self {
        Self(outputs)
    }

    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Option<&mut P> {
        self.0.get_mut(index)
    }

    /// Gives the pins back.
    pub fn into_inner(self) -> [P; N] {
        self.0
    }
}

impl<P: OutputPin, const N: usize> OutputPins for OutputArray<P, N> {
    /// A typed `embedded_hal` output is already in output mode; only the id is checked.
    fn configure_output(&mut self, pin: u8) -> Result<()> {
        self.get_mut(usize::from(pin)).ok_or(PinOutOfRange { pin })?;
        Ok(())
    }

    #[inline]
    fn write(&mut self, pin: u8, state: PinState) -> Result<()> {
        self.get_mut(usize::from(pin))
            .ok_or(PinOutOfRange { pin })?
            .set_state(state)
            .map_err(|err| err.kind().into())
    }
}

#[cfg(test)]
mod tests {
    use core::convert::Infallible;

    use embedded_hal::digital::{ErrorKind, ErrorType};

    use super::*;
    use crate::Error;

    #[derive(Default)]
    struct FakePin(bool);

    impl ErrorType for FakePin {
        type Error = Infallible;
    }

    impl OutputPin for FakePin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = false;
            Ok(())
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            self.0 = true;
            Ok(())
        }
    }

    struct BrokenPin;

    impl ErrorType for BrokenPin {
        type Error = ErrorKind;
    }

    impl OutputPin for BrokenPin {
        fn set_low(&mut self) -> core::result::Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }

        fn set_high(&mut self) -> core::result::Result<(), Self::Error> {
            Err(ErrorKind::Other)
        }
    }

    #[test]
    fn test_write_by_index() {
        let mut pins = OutputArray::new([FakePin::default(), FakePin::default()]);
        pins.write(1, PinState::High).expect("pin 1 exists");
        let [first, second] = pins.into_inner();
        assert!(!first.0);
        assert!(second.0);
    }

    #[test]
    fn test_unknown_pin_is_rejected() {
        let mut pins = OutputArray::new([FakePin::default()]);
        assert_eq!(pins.configure_output(0), Ok(()));
        assert_eq!(pins.configure_output(3), Err(Error::PinOutOfRange { pin: 3 }));
        assert_eq!(
            pins.write(1, PinState::Low),
            Err(Error::PinOutOfRange { pin: 1 })
        );
    }

    #[test]
    fn test_driver_failure_becomes_transport_error() {
        let mut pins = OutputArray::new([BrokenPin]);
        assert_eq!(
            pins.write(0, PinState::High),
            Err(Error::CannotSetOutputState(ErrorKind::Other))
        );
    }
}

//! Virtual-clock model of a pulled-up 1-Wire line with one slave attached.

use crate::{BusPin, GpioOneWire, TimeSlot};
use core::convert::Infallible;
use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, PinState};
use std::{cell::RefCell, collections::VecDeque, rc::Rc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Output,
    InputPullUp,
    Drive(bool),
    Sample(bool),
}

#[derive(Default)]
pub(crate) struct Slave {
    pub present: bool,
    /// Bits decoded from write slots, in bus order.
    pub received: Vec<bool>,
    /// Bits answered in read slots; a slot is a read slot while this is non-empty.
    pub transmit: VecDeque<bool>,
    /// Temperature register served after Skip ROM + Read Scratchpad.
    pub scratchpad: Option<[u8; 2]>,
    /// Skip ROM + Convert T commands seen.
    pub conversions: usize,
    presence: Option<(u64, u64)>,
    slot: Option<(u64, bool)>,
}

impl Slave {
    fn command(&mut self) {
        if self.received.len() != 16 {
            return;
        }
        let mut bytes = self.received.chunks(8).map(|bits| {
            bits.iter()
                .enumerate()
                .fold(0u8, |acc, (i, &b)| acc | (u8::from(b) << i))
        });
        match (bytes.next(), bytes.next()) {
            (Some(0xcc), Some(0x44)) => self.conversions += 1,
            (Some(0xcc), Some(0xbe)) => {
                if let Some(pad) = self.scratchpad {
                    let bits = pad
                        .into_iter()
                        .flat_map(|byte| (0..8).map(move |i| (byte >> i) & 1 == 1));
                    self.transmit.extend(bits);
                }
            }
            _ => {}
        }
    }
}

#[derive(Default)]
pub(crate) struct Line {
    now_ns: u64,
    output: bool,
    master_low: bool,
    fall_ns: u64,
    pub slave: Slave,
    pub events: Vec<(u64, Event)>,
}

impl Line {
    pub fn now_us(&self) -> u64 {
        self.now_ns / 1000
    }

    fn log(&mut self, event: Event) {
        let at = self.now_us();
        self.events.push((at, event));
    }

    fn pull_low(&mut self) {
        if self.master_low {
            return;
        }
        self.master_low = true;
        let now = self.now_ns;
        self.fall_ns = now;
        self.slave.slot = self.slave.transmit.pop_front().map(|b| (now, b));
    }

    fn let_go(&mut self) {
        if !self.master_low {
            return;
        }
        self.master_low = false;
        let low_us = (self.now_ns - self.fall_ns) / 1000;
        if low_us >= u64::from(TimeSlot::ResetLow.micros()) {
            self.slave.slot = None;
            self.slave.received.clear();
            if self.slave.present {
                // presence pulse 15..135 us after release
                self.slave.presence = Some((self.now_ns + 15_000, self.now_ns + 135_000));
            }
        } else if self.slave.slot.is_none() {
            self.slave.received.push(low_us < 15);
            self.slave.command();
        }
    }

    fn level(&self) -> bool {
        if self.master_low {
            return false;
        }
        if let Some((from, to)) = self.slave.presence {
            if (from..to).contains(&self.now_ns) {
                return false;
            }
        }
        if let Some((fall, false)) = self.slave.slot {
            if self.now_ns < fall + 15_000 {
                return false;
            }
        }
        true
    }
}

pub(crate) struct SimPin(pub Rc<RefCell<Line>>);

pub(crate) struct SimDelay(pub Rc<RefCell<Line>>);

impl ErrorType for SimPin {
    type Error = Infallible;
}

impl BusPin for SimPin {
    fn set_output(&mut self) -> Result<(), Infallible> {
        let mut line = self.0.borrow_mut();
        line.output = true;
        line.log(Event::Output);
        Ok(())
    }

    fn set_input_pullup(&mut self) -> Result<(), Infallible> {
        let mut line = self.0.borrow_mut();
        line.output = false;
        line.let_go();
        line.log(Event::InputPullUp);
        Ok(())
    }

    fn drive(&mut self, level: PinState) -> Result<(), Infallible> {
        let mut line = self.0.borrow_mut();
        assert!(line.output, "driving a pin configured as input");
        match level {
            PinState::Low => line.pull_low(),
            PinState::High => line.let_go(),
        }
        line.log(Event::Drive(level == PinState::High));
        Ok(())
    }

    fn sample(&mut self) -> Result<PinState, Infallible> {
        let mut line = self.0.borrow_mut();
        assert!(!line.output, "sampling a pin configured as output");
        let high = line.level();
        line.log(Event::Sample(high));
        Ok(PinState::from(high))
    }
}

impl DelayNs for SimDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.0.borrow_mut().now_ns += u64::from(ns);
    }
}

pub(crate) fn sim_bus(present: bool) -> (GpioOneWire<SimPin, SimDelay>, Rc<RefCell<Line>>) {
    let line = Rc::new(RefCell::new(Line::default()));
    line.borrow_mut().slave.present = present;
    let bus = GpioOneWire::new(SimPin(line.clone()), SimDelay(line.clone()));
    (bus, line)
}

#[cfg(test)]
mod tests {
    use super::Event::*;
    use super::*;
    use ds18b20::{Ds18b20, SessionState};
    use embedded_onewire::{OneWire, OneWireError};

    fn bits_to_byte(bits: &[bool]) -> u8 {
        bits.iter()
            .enumerate()
            .fold(0, |acc, (i, &b)| acc | ((b as u8) << i))
    }

    #[test]
    fn reset_timing() {
        let (mut bus, line) = sim_bus(true);
        bus.reset().unwrap();
        let line = line.borrow();
        assert_eq!(
            line.events,
            [
                (0, Output),
                (0, Drive(false)),
                (480, InputPullUp),
                (550, Sample(false)),
                (960, Sample(true)),
            ]
        );
        assert!(line.now_us() >= 960);
    }

    #[test]
    fn reset_without_device() {
        let (mut bus, line) = sim_bus(false);
        assert!(matches!(bus.reset(), Err(OneWireError::NoDevicePresent)));
        assert!(line.borrow().events.contains(&(550, Sample(true))));
    }

    #[test]
    fn write_one_releases_early() {
        let (mut bus, line) = sim_bus(true);
        bus.write_bit(true).unwrap();
        let line = line.borrow();
        assert_eq!(
            line.events,
            [(0, Output), (0, Drive(false)), (5, Drive(true))]
        );
        assert_eq!(line.now_us(), 60);
        assert_eq!(line.slave.received, [true]);
    }

    #[test]
    fn write_zero_holds_most_of_the_slot() {
        let (mut bus, line) = sim_bus(true);
        bus.write_bit(false).unwrap();
        let line = line.borrow();
        assert_eq!(
            line.events,
            [(0, Output), (0, Drive(false)), (60, Drive(true))]
        );
        assert_eq!(line.now_us(), 65);
        assert_eq!(line.slave.received, [false]);
    }

    #[test]
    fn read_samples_inside_the_window() {
        let (mut bus, line) = sim_bus(true);
        line.borrow_mut().slave.transmit.extend([false, true]);
        assert!(!bus.read_bit().unwrap());
        assert!(bus.read_bit().unwrap());
        let line = line.borrow();
        assert_eq!(
            &line.events[..4],
            [(0, Output), (0, Drive(false)), (5, InputPullUp), (10, Sample(false))]
        );
        assert_eq!(line.now_us(), 120);
        assert!(line.slave.received.is_empty());
    }

    #[test]
    fn byte_loopback() {
        let (mut bus, line) = sim_bus(true);
        bus.write_byte(0xa5).unwrap();
        {
            let mut line = line.borrow_mut();
            assert_eq!(bits_to_byte(&line.slave.received), 0xa5);
            let echo: Vec<bool> = line.slave.received.drain(..).collect();
            line.slave.transmit.extend(echo);
        }
        assert_eq!(bus.read_byte().unwrap(), 0xa5);
    }

    #[test]
    fn skip_rom_after_reset() {
        let (mut bus, line) = sim_bus(true);
        bus.address_all().unwrap();
        assert_eq!(bits_to_byte(&line.borrow().slave.received), 0xcc);
    }

    #[test]
    fn ds18b20_cycle_over_the_line() {
        let (mut bus, line) = sim_bus(true);
        line.borrow_mut().slave.scratchpad = Some([0x91, 0x01]);
        let mut delay = SimDelay(line.clone());
        let mut sensor = Ds18b20::new();
        let temp = sensor.read_temperature(&mut bus, &mut delay).unwrap();
        assert_eq!(temp.celsius(), 25.0625);
        assert_eq!(sensor.state(), SessionState::Decoded);
        let line = line.borrow();
        assert_eq!(line.slave.conversions, 1);
        assert!(line.slave.transmit.is_empty());
        assert!(line.now_us() >= 750_000 + 2 * 960);
    }

    #[test]
    fn ds18b20_cycle_without_device() {
        let (mut bus, line) = sim_bus(false);
        let mut delay = SimDelay(line.clone());
        let mut sensor = Ds18b20::new();
        let err = sensor.read_temperature(&mut bus, &mut delay).unwrap_err();
        assert!(err.is_absent());
        assert_eq!(sensor.state(), SessionState::Reset1);
        let line = line.borrow();
        // a reset and nothing after it
        assert_eq!(line.events.len(), 5);
        assert_eq!(line.slave.conversions, 0);
    }
}

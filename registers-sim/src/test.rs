use std::panic::catch_unwind;

use pretty_assertions::assert_eq;
use registers::{Edge, Port, Register, RegisterInterface};

use crate::{GPIO_CONFIG_RESET, SimulatedRegisters};

macro_rules! setup_line {
    ($registers:ident, $port:expr, $line:expr) => {
        let $registers = SimulatedRegisters::new();
        $registers.write_field(
            Register::AfioExticr($line / 4),
            ($line % 4) * 4,
            4,
            $port.code(),
        );
    };
}

#[test]
fn gpio_configuration_starts_at_reset_value() {
    let registers = SimulatedRegisters::new();

    for port in Port::ALL {
        assert_eq!(registers.read(Register::GpioCrl(port)), GPIO_CONFIG_RESET);
        assert_eq!(registers.read(Register::GpioCrh(port)), GPIO_CONFIG_RESET);
    }
}

#[test]
fn exti_pending_is_write_one_to_clear() {
    setup_line!(registers, Port::A, 0);
    registers.write(Register::ExtiRtsr, 0b11);
    registers.write_field(Register::AfioExticr(0), 4, 4, Port::A.code());

    registers.drive_edge(Port::A, 0, Edge::Rising);
    registers.drive_edge(Port::A, 1, Edge::Rising);
    assert_eq!(registers.read(Register::ExtiPr), 0b11);

    registers.write(Register::ExtiPr, 0b10);
    assert_eq!(registers.read(Register::ExtiPr), 0b01);

    registers.write(Register::ExtiPr, 0);
    assert_eq!(registers.read(Register::ExtiPr), 0b01);
}

#[test]
fn nvic_set_and_clear_registers_share_one_bank() {
    let registers = SimulatedRegisters::new();

    registers.write(Register::NvicIser(1), 1 << 8);
    registers.write(Register::NvicIser(1), 1 << 3);
    assert_eq!(registers.read(Register::NvicIser(1)), (1 << 8) | (1 << 3));
    assert_eq!(registers.read(Register::NvicIcer(1)), (1 << 8) | (1 << 3));

    registers.write(Register::NvicIcer(1), 1 << 3);
    assert_eq!(registers.read(Register::NvicIser(1)), 1 << 8);

    registers.write(Register::NvicIspr(0), 1 << 6);
    registers.write(Register::NvicIcpr(0), 1 << 7);
    assert!(registers.is_irq_pending(6));

    registers.write(Register::NvicIcpr(0), 1 << 6);
    assert!(!registers.is_irq_pending(6));
}

#[test]
fn priority_bytes_keep_only_implemented_bits() {
    let registers = SimulatedRegisters::new();

    registers.write(Register::NvicIpr(10), 0x1234_5678);

    assert_eq!(registers.read(Register::NvicIpr(10)), 0x1030_5070);
}

#[test]
fn bsrr_sets_and_resets_output_bits() {
    let registers = SimulatedRegisters::new();

    registers.write(Register::GpioBsrr(Port::A), 1 << 5);
    registers.write(Register::GpioBsrr(Port::A), 1 << 8);
    assert_eq!(registers.read(Register::GpioOdr(Port::A)), (1 << 5) | (1 << 8));

    registers.write(Register::GpioBsrr(Port::A), 1 << (16 + 5));
    assert_eq!(registers.read(Register::GpioOdr(Port::A)), 1 << 8);
    assert_eq!(registers.read(Register::GpioBsrr(Port::A)), 0);
}

#[test]
fn edges_only_latch_for_the_selected_port_and_enabled_edge() {
    setup_line!(registers, Port::C, 13);
    registers.write(Register::ExtiFtsr, 1 << 13);

    registers.drive_edge(Port::A, 13, Edge::Falling);
    registers.drive_edge(Port::C, 13, Edge::Rising);
    assert_eq!(registers.read(Register::ExtiPr), 0);

    registers.drive_edge(Port::C, 13, Edge::Falling);
    assert_eq!(registers.read(Register::ExtiPr), 1 << 13);
}

#[test]
fn masked_line_does_not_pend_its_interrupt() {
    setup_line!(registers, Port::C, 13);
    registers.write(Register::ExtiFtsr, 1 << 13);

    registers.drive_edge(Port::C, 13, Edge::Falling);
    assert!(!registers.is_irq_pending(40));

    registers.write(Register::ExtiImr, 1 << 13);
    assert!(registers.is_irq_pending(40));
}

#[test]
fn dispatch_needs_enabled_and_pending() {
    setup_line!(registers, Port::C, 13);
    registers.write(Register::ExtiFtsr, 1 << 13);
    registers.write(Register::ExtiImr, 1 << 13);
    registers.drive_edge(Port::C, 13, Edge::Falling);

    let mut runs = 0;
    assert!(!registers.dispatch(40, || runs += 1));

    registers.write(Register::NvicIser(1), 1 << 8);
    assert!(registers.dispatch(40, || runs += 1));
    assert!(!registers.dispatch(41, || runs += 1));
    assert_eq!(runs, 1);
}

#[test]
fn pending_line_re_pends_after_nvic_clear() {
    setup_line!(registers, Port::C, 13);
    registers.write(Register::ExtiFtsr, 1 << 13);
    registers.write(Register::ExtiImr, 1 << 13);
    registers.drive_edge(Port::C, 13, Edge::Falling);

    registers.write(Register::NvicIcpr(1), 1 << 8);
    assert!(registers.is_irq_pending(40));

    registers.write(Register::ExtiPr, 1 << 13);
    registers.write(Register::NvicIcpr(1), 1 << 8);
    assert!(!registers.is_irq_pending(40));
}

#[test]
fn unimplemented_bank_index_is_rejected_before_storage() {
    let registers = SimulatedRegisters::new();

    assert!(catch_unwind(|| registers.write(Register::NvicIpr(17), 0xF0)).is_err());
    assert!(catch_unwind(|| registers.read(Register::AfioExticr(4))).is_err());
    assert_eq!(registers.read(Register::NvicIpr(16)), 0);
}

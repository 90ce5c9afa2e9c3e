//! Integration tests for jitop_rs.
//!
//! These tests exercise the public API end-to-end, verifying the operand
//! packing contracts and the calling-convention dispatch the way an
//! instruction encoder would consume them.

use jitop_rs::{
    AddrType, CallConv, CallConvId, Imm, Label, Mem, OpType, Operand, Reg, RegGroup, RegOnly,
    RegType,
};

// ============================================================================
// Operand basics
// ============================================================================

#[test]
fn default_operand_is_none() {
    let a = Operand::default();
    let mut b = Operand::from(Reg::from_type_and_id(RegType::GP64, 1));
    assert_ne!(a, b);

    b.reset();
    assert_eq!(a, b);
    assert!(a.is_none());
    assert!(b.is_none());
    assert_eq!(a, Operand::NONE);
}

#[test]
fn operands_compare_bitwise() {
    let a = Operand::from(Imm::from_i64(7));
    let b = Operand::from(Imm::from_i64(7));
    let c = Operand::from(Imm::from_i64(8));
    assert_eq!(a, b);
    assert_ne!(a, c);
}

#[test]
fn operand_words_expose_binary_contract() {
    let reg = Reg::from_type_and_id(RegType::GP64, 5);
    let op = Operand::from(reg);
    let words = op.words();

    // Word 0 is the signature, word 1 the id, and the upper words are
    // unused by registers.
    assert_eq!(words[0], reg.signature());
    assert_eq!(words[1], 5);
    assert_eq!(words[2], 0);
    assert_eq!(words[3], 0);
    assert_eq!(Operand::from_words(words[0], words[1], words[2], words[3]), op);
}

// ============================================================================
// Scenario A: physical general purpose registers
// ============================================================================

#[test]
fn phys_gp_registers() {
    let r0 = Reg::from_type_and_id(RegType::GP64, 0);
    let r7 = Reg::from_type_and_id(RegType::GP64, 7);

    assert!(r0.is_gp());
    assert!(r7.is_gp());
    assert!(!r0.is_vec());
    assert_eq!(r0.size(), 8);
    assert_eq!(r7.size(), 8);
    assert!(r0.is_phys_reg());
    assert!(r7.is_phys_reg());
    assert_ne!(r0, r7);
    assert!(!r0.is_same(&r7));
}

// ============================================================================
// Scenario B: memory operand with a virtual base register
// ============================================================================

#[test]
fn mem_with_virtual_base() {
    let vreg = Reg::from_type_and_id(RegType::GP64, 0x150);
    assert!(vreg.is_virt_reg());

    let mut mem = Mem::new();
    mem.set_base(&vreg);
    mem.set_offset(-8);

    assert!(mem.has_base());
    assert!(mem.has_base_reg());
    assert!(!mem.has_index());
    assert!(!mem.is_offset_64bit());
    assert_eq!(mem.offset(), -8);
    assert_eq!(mem.base_id(), 0x150);
}

// ============================================================================
// Scenario C: 64-bit absolute address
// ============================================================================

#[test]
fn mem_with_wide_absolute_address() {
    let mut mem = Mem::new();
    mem.set_offset(0x1_0000_0008);

    assert!(mem.is_offset_64bit());
    assert_eq!(mem.offset(), 0x1_0000_0008);
    assert!(!mem.has_base());

    let abs = Mem::abs(0x1_0000_0008);
    assert_eq!(abs.offset(), 0x1_0000_0008);
    assert_eq!(abs.addr_type(), AddrType::Abs);
}

// ============================================================================
// Scenario D: unknown calling convention
// ============================================================================

#[test]
fn callconv_rejects_unknown_id() {
    let mut cc = CallConv::new();
    cc.init(CallConvId::X86_SYS_V64).unwrap();
    assert!(cc.is_initialized());

    let err = cc.init(CallConvId::from_raw(0x7FFF_0000));
    assert!(err.is_err());
    assert!(!cc.is_initialized());
    assert_eq!(cc, CallConv::new());
}

// ============================================================================
// Base and index independence
// ============================================================================

#[test]
fn setting_base_keeps_index() {
    let base = Reg::from_type_and_id(RegType::GP64, 3);
    let index = Reg::from_type_and_id(RegType::GP32, 9);

    let mut mem = Mem::new();
    mem.set_index(&index);
    let index_ty = mem.index_type();
    mem.set_base(&base);

    assert_eq!(mem.index_type(), index_ty);
    assert_eq!(mem.index_id(), 9);
    assert_eq!(mem.base_type(), RegType::GP64.bits());
    assert_eq!(mem.base_id(), 3);

    // And the other way around.
    let mut mem2 = Mem::new();
    mem2.set_base(&base);
    mem2.set_index(&index);
    assert_eq!(mem2.base_type(), RegType::GP64.bits());
    assert_eq!(mem2.base_id(), 3);
    assert_eq!(mem2.base_and_index_types(), mem.base_and_index_types());
}

// ============================================================================
// Labels
// ============================================================================

#[test]
fn label_round_trip_through_memory_base() {
    let label = Label::from_id(42);
    assert!(label.is_valid());

    let mem = Mem::label_offset(&label, 16);
    assert!(mem.has_base_label());
    assert!(!mem.has_base_reg());
    assert_eq!(mem.base_id(), 42);
    assert_eq!(mem.offset(), 16);

    // The same id space also serves virtual registers; a label id in a
    // packed range never collides with a physical register index.
    assert!(Operand::is_packed_id(Operand::pack_id(42)));
}

#[test]
fn unbound_label_is_invalid() {
    let label = Label::new();
    assert!(!label.is_valid());
    assert_eq!(label.as_operand().op_type(), OpType::Label);
}

// ============================================================================
// RegOnly
// ============================================================================

#[test]
fn reg_only_reconstruction() {
    let reg = Reg::from_type_and_id(RegType::VEC128, 14);
    let slim = RegOnly::from_reg(&reg);
    let back = slim.to_reg();
    assert_eq!(back, reg);
    assert!(back.is_vec());
    assert_eq!(back.size(), 16);
}

// ============================================================================
// Calling conventions across families
// ============================================================================

#[test]
fn callconv_families_dispatch_independently() {
    let mut cc = CallConv::new();

    cc.init(CallConvId::X86_WIN64).unwrap();
    assert_eq!(cc.spill_zone_size(), 32);

    cc.init(CallConvId::AARCH64_AAPCS).unwrap();
    assert_eq!(cc.spill_zone_size(), 0);
    assert_eq!(cc.natural_stack_alignment(), 16);
    assert_eq!(cc.passed_order(RegGroup::GP)[0], 0);
}

#[test]
fn host_convention_initializes() {
    let id = CallConvId::host();
    if id != CallConvId::NONE {
        let mut cc = CallConv::new();
        cc.init(id).unwrap();
        assert!(cc.is_initialized());
        assert_eq!(cc.id(), id);
    }
}

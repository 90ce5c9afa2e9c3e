//! AArch64 register definitions and calling-convention rules.
//!
//! The 64-bit ARM register file maps cleanly onto the neutral taxonomy:
//! W/X registers are the 32/64-bit general purpose types and the SIMD
//! registers are vector views from 32 to 128 bits wide.

use crate::callconv::{reg_mask, Arch, CallConv, CallConvId};
use crate::error::Error;
use crate::operand::{Reg, RegGroup, RegType};

// ─── Register ids ────────────────────────────────────────────────────────────

/// Id of the platform register (reserved on most operating systems).
pub const ID_PLATFORM: u32 = 18;
/// Id of the frame pointer (X29).
pub const ID_FP: u32 = 29;
/// Id of the link register (X30).
pub const ID_LR: u32 = 30;
/// Id shared by the stack pointer and the zero register (encoding 31).
pub const ID_SP: u32 = 31;

// ─── Register constructors ───────────────────────────────────────────────────

/// 32-bit general purpose register (W0..W30).
#[must_use]
pub const fn w(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP32, id)
}

/// 64-bit general purpose register (X0..X30).
#[must_use]
pub const fn x(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP64, id)
}

/// 32-bit scalar view of a SIMD register (S0..S31).
#[must_use]
pub const fn s(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::VEC32, id)
}

/// 64-bit scalar view of a SIMD register (D0..D31).
#[must_use]
pub const fn d(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::VEC64, id)
}

/// 128-bit SIMD register (V0..V31).
#[must_use]
pub const fn v(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::VEC128, id)
}

// ─── Calling conventions ─────────────────────────────────────────────────────

/// Populate `cc` with the rules of an AArch64-family convention.
///
/// `id` must already be classified as AArch64 family; the caller
/// dispatches.
pub(crate) fn init_call_conv(cc: &mut CallConv, id: CallConvId) -> Result<(), Error> {
    match id {
        CallConvId::AARCH64_AAPCS => {
            cc.set_arch(Arch::Aarch64);
            cc.set_flags(CallConv::FLAG_PASS_FLOATS_BY_VEC);
            cc.set_natural_stack_alignment(16);
            cc.set_passed_order(RegGroup::GP, &[0, 1, 2, 3, 4, 5, 6, 7]);
            cc.set_passed_order(RegGroup::VEC, &[0, 1, 2, 3, 4, 5, 6, 7]);
            // X19..X28 plus the frame pointer. The platform register X18
            // is left to the operating system.
            cc.set_preserved_regs(
                RegGroup::GP,
                reg_mask(&[19, 20, 21, 22, 23, 24, 25, 26, 27, 28, 29]),
            );
            // Only the low 64 bits of V8..V15 are callee-saved; the mask
            // tracks the registers, the encoder narrows the views.
            cc.set_preserved_regs(RegGroup::VEC, reg_mask(&[8, 9, 10, 11, 12, 13, 14, 15]));
        }

        _ => {
            return Err(Error::InvalidArgument {
                what: "unrecognized calling convention id",
            });
        }
    }

    cc.set_id(id);
    Ok(())
}

// ─── Tests ───────────────────────────────────────────────────────────────────

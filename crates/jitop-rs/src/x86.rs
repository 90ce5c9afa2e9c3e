//! x86 and x86-64 register definitions and calling-convention rules.
//!
//! Claims the architecture-specific slots of the neutral register
//! taxonomy (MMX and K registers map to the two "other" groups, segment,
//! control, debug, x87, and bound registers extend from
//! [`RegType::CUSTOM`]) and provides the rule tables for every convention
//! in the x86 family.

use crate::callconv::{lsb_mask, reg_mask, Arch, CallConv, CallConvId, CallConvStrategy};
use crate::error::Error;
use crate::operand::{reg_signature, Reg, RegGroup, RegType};

// ─── Register ids ────────────────────────────────────────────────────────────

/// Id of AL/AX/EAX/RAX.
pub const ID_AX: u32 = 0;
/// Id of CL/CX/ECX/RCX.
pub const ID_CX: u32 = 1;
/// Id of DL/DX/EDX/RDX.
pub const ID_DX: u32 = 2;
/// Id of BL/BX/EBX/RBX.
pub const ID_BX: u32 = 3;
/// Id of SPL/SP/ESP/RSP.
pub const ID_SP: u32 = 4;
/// Id of BPL/BP/EBP/RBP.
pub const ID_BP: u32 = 5;
/// Id of SIL/SI/ESI/RSI.
pub const ID_SI: u32 = 6;
/// Id of DIL/DI/EDI/RDI.
pub const ID_DI: u32 = 7;

// ─── Register types and groups ───────────────────────────────────────────────

/// MMX register type, one of the two neutral "other" slots.
pub const TYPE_MM: RegType = RegType::OTHER0;
/// AVX-512 mask (K) register type, the second "other" slot.
pub const TYPE_K: RegType = RegType::OTHER1;
/// Instruction pointer (EIP/RIP).
pub const TYPE_RIP: RegType = RegType::IP;
/// Segment register.
pub const TYPE_SEG: RegType = RegType::custom(0);
/// Control register.
pub const TYPE_CREG: RegType = RegType::custom(1);
/// Debug register.
pub const TYPE_DREG: RegType = RegType::custom(2);
/// x87 floating point stack register.
pub const TYPE_ST: RegType = RegType::custom(3);
/// MPX bound register.
pub const TYPE_BND: RegType = RegType::custom(4);

/// MMX register group.
pub const GROUP_MM: RegGroup = RegGroup::OTHER0;
/// AVX-512 mask (K) register group.
pub const GROUP_K: RegGroup = RegGroup::OTHER1;

// Signatures of the x86-specific kinds. The neutral GP and vector kinds
// use their canonical signatures. Control and debug registers have an
// architecture-dependent width and report the largest (zero here means
// the encoder decides, matching the instruction pointer convention).
const SIG_MM: u32 = reg_signature(TYPE_MM, GROUP_MM, 8);
const SIG_K: u32 = reg_signature(TYPE_K, GROUP_K, 0);
const SIG_RIP: u32 = reg_signature(TYPE_RIP, RegGroup::VIRT, 0);
const SIG_SEG: u32 = reg_signature(TYPE_SEG, RegGroup::from_bits(5), 2);
const SIG_CREG: u32 = reg_signature(TYPE_CREG, RegGroup::from_bits(6), 0);
const SIG_DREG: u32 = reg_signature(TYPE_DREG, RegGroup::from_bits(7), 0);
const SIG_ST: u32 = reg_signature(TYPE_ST, RegGroup::from_bits(8), 10);
const SIG_BND: u32 = reg_signature(TYPE_BND, RegGroup::from_bits(9), 16);

// ─── Register constructors ───────────────────────────────────────────────────

/// 8-bit low general purpose register (AL, CL, SPL, R8B, ...).
#[must_use]
pub const fn gpb_lo(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP8_LO, id)
}

/// 8-bit high general purpose register (AH, CH, DH, BH).
#[must_use]
pub const fn gpb_hi(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP8_HI, id)
}

/// 16-bit general purpose register (AX, CX, ...).
#[must_use]
pub const fn gpw(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP16, id)
}

/// 32-bit general purpose register (EAX, ECX, ...).
#[must_use]
pub const fn gpd(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP32, id)
}

/// 64-bit general purpose register (RAX, RCX, ...).
#[must_use]
pub const fn gpq(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::GP64, id)
}

/// 128-bit SSE register.
#[must_use]
pub const fn xmm(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::VEC128, id)
}

/// 256-bit AVX register.
#[must_use]
pub const fn ymm(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::VEC256, id)
}

/// 512-bit AVX-512 register.
#[must_use]
pub const fn zmm(id: u32) -> Reg {
    Reg::from_type_and_id(RegType::VEC512, id)
}

/// MMX register.
#[must_use]
pub const fn mm(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_MM, id)
}

/// AVX-512 mask register.
#[must_use]
pub const fn k(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_K, id)
}

/// The instruction pointer.
#[must_use]
pub const fn rip() -> Reg {
    Reg::from_signature_and_id(SIG_RIP, 0)
}

/// Segment register.
#[must_use]
pub const fn seg(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_SEG, id)
}

/// Control register.
#[must_use]
pub const fn creg(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_CREG, id)
}

/// Debug register.
#[must_use]
pub const fn dreg(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_DREG, id)
}

/// x87 stack register.
#[must_use]
pub const fn st(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_ST, id)
}

/// MPX bound register.
#[must_use]
pub const fn bnd(id: u32) -> Reg {
    Reg::from_signature_and_id(SIG_BND, id)
}

/// RAX.
pub const RAX: Reg = gpq(ID_AX);
/// RCX.
pub const RCX: Reg = gpq(ID_CX);
/// RDX.
pub const RDX: Reg = gpq(ID_DX);
/// RBX.
pub const RBX: Reg = gpq(ID_BX);
/// RSP.
pub const RSP: Reg = gpq(ID_SP);
/// RBP.
pub const RBP: Reg = gpq(ID_BP);
/// RSI.
pub const RSI: Reg = gpq(ID_SI);
/// RDI.
pub const RDI: Reg = gpq(ID_DI);

// ─── Calling conventions ─────────────────────────────────────────────────────

const AX: u8 = ID_AX as u8;
const CX: u8 = ID_CX as u8;
const DX: u8 = ID_DX as u8;
const BX: u8 = ID_BX as u8;
const SP: u8 = ID_SP as u8;
const BP: u8 = ID_BP as u8;
const SI: u8 = ID_SI as u8;
const DI: u8 = ID_DI as u8;

/// Populate `cc` with the rules of an x86-family convention.
///
/// `id` must already be classified as x86 family; the caller dispatches.
pub(crate) fn init_call_conv(cc: &mut CallConv, id: CallConvId) -> Result<(), Error> {
    match id {
        CallConvId::X86_CDECL => {
            x86_32_common(cc);
        }

        CallConvId::X86_STD_CALL => {
            cc.add_flags(CallConv::FLAG_CALLEE_POPS_STACK);
            x86_32_common(cc);
        }

        CallConvId::X86_MS_THIS_CALL => {
            cc.add_flags(CallConv::FLAG_CALLEE_POPS_STACK);
            cc.set_passed_order(RegGroup::GP, &[CX]);
            x86_32_common(cc);
        }

        CallConvId::X86_MS_FAST_CALL | CallConvId::X86_GCC_FAST_CALL => {
            cc.add_flags(CallConv::FLAG_CALLEE_POPS_STACK);
            cc.set_passed_order(RegGroup::GP, &[CX, DX]);
            x86_32_common(cc);
        }

        CallConvId::X86_GCC_REG_PARM_1 => {
            cc.set_passed_order(RegGroup::GP, &[AX]);
            x86_32_common(cc);
        }

        CallConvId::X86_GCC_REG_PARM_2 => {
            cc.set_passed_order(RegGroup::GP, &[AX, DX]);
            x86_32_common(cc);
        }

        CallConvId::X86_GCC_REG_PARM_3 => {
            cc.set_passed_order(RegGroup::GP, &[AX, DX, CX]);
            x86_32_common(cc);
        }

        CallConvId::X86_WIN64 => {
            cc.set_arch(Arch::X64);
            cc.set_strategy(CallConvStrategy::Win64);
            cc.set_flags(CallConv::FLAG_PASS_FLOATS_BY_VEC | CallConv::FLAG_INDIRECT_VEC_ARGS);
            cc.set_natural_stack_alignment(16);
            cc.set_spill_zone_size(32);
            cc.set_passed_order(RegGroup::GP, &[CX, DX, 8, 9]);
            cc.set_passed_order(RegGroup::VEC, &[0, 1, 2, 3]);
            cc.set_preserved_regs(
                RegGroup::GP,
                reg_mask(&[BX, SP, BP, SI, DI, 12, 13, 14, 15]),
            );
            cc.set_preserved_regs(
                RegGroup::VEC,
                reg_mask(&[6, 7, 8, 9, 10, 11, 12, 13, 14, 15]),
            );
        }

        CallConvId::X86_SYS_V64 => {
            cc.set_arch(Arch::X64);
            cc.set_flags(CallConv::FLAG_PASS_FLOATS_BY_VEC);
            cc.set_natural_stack_alignment(16);
            cc.set_red_zone_size(128);
            cc.set_passed_order(RegGroup::GP, &[DI, SI, DX, CX, 8, 9]);
            cc.set_passed_order(RegGroup::VEC, &[0, 1, 2, 3, 4, 5, 6, 7]);
            cc.set_preserved_regs(RegGroup::GP, reg_mask(&[BX, SP, BP, 12, 13, 14, 15]));
        }

        CallConvId::X86_LIGHT_CALL_2
        | CallConvId::X86_LIGHT_CALL_3
        | CallConvId::X86_LIGHT_CALL_4 => {
            let n = (id.raw() - CallConvId::X86_LIGHT_CALL_2.raw()) + 2;

            cc.set_arch(Arch::X86);
            light_call_common(cc);
            cc.set_preserved_regs(RegGroup::GP, lsb_mask(8));
            cc.set_preserved_regs(RegGroup::VEC, lsb_mask(8) & !lsb_mask(n));
        }

        CallConvId::X64_LIGHT_CALL_2
        | CallConvId::X64_LIGHT_CALL_3
        | CallConvId::X64_LIGHT_CALL_4 => {
            let n = (id.raw() - CallConvId::X64_LIGHT_CALL_2.raw()) + 2;

            cc.set_arch(Arch::X64);
            light_call_common(cc);
            cc.set_preserved_regs(RegGroup::GP, lsb_mask(16));
            cc.set_preserved_regs(RegGroup::VEC, !lsb_mask(n));
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

/// Rules shared by every 32-bit stack-based convention.
fn x86_32_common(cc: &mut CallConv) {
    cc.set_arch(Arch::X86);
    cc.set_natural_stack_alignment(4);
    cc.set_preserved_regs(RegGroup::GP, reg_mask(&[BX, SP, BP, SI, DI]));
}

/// Argument order shared by the internal light-call conventions.
fn light_call_common(cc: &mut CallConv) {
    cc.add_flags(CallConv::FLAG_PASS_FLOATS_BY_VEC);
    cc.set_natural_stack_alignment(16);
    cc.set_passed_order(RegGroup::GP, &[AX, DX, CX, SI, DI]);
    cc.set_passed_order(GROUP_MM, &[0, 1, 2, 3, 4, 5, 6, 7]);
    cc.set_passed_order(RegGroup::VEC, &[0, 1, 2, 3, 4, 5, 6, 7]);
    cc.set_preserved_regs(GROUP_MM, lsb_mask(8));
    cc.set_preserved_regs(GROUP_K, lsb_mask(8));
}

// ─── Tests ───────────────────────────────────────────────────────────────────

//! # jitop-rs — Operand Model for JIT and Remote Assemblers
//!
//! `jitop-rs` is the operand representation layer of a runtime assembler:
//! a compact, fixed-size, tagged encoding that lets a code generator
//! describe registers, memory addresses, immediates, and labels
//! uniformly, plus the calling-convention descriptor that tells an
//! encoder how arguments and return values map onto those operands.
//!
//! ## Quick Start
//!
//! ```rust
//! use jitop_rs::{CallConv, CallConvId, Imm, Mem, Reg, RegType};
//!
//! // Describe operands for an encoder to consume.
//! let base = Reg::from_type_and_id(RegType::GP64, 0);
//! let mut slot = Mem::base_offset(&base, -8);
//! slot.set_reg_home();
//!
//! let imm = Imm::from_i64(42);
//! assert!(imm.is_int8());
//!
//! // Resolve a calling convention once per function/target.
//! let mut cc = CallConv::new();
//! cc.init(CallConvId::X86_SYS_V64).unwrap();
//! assert_eq!(cc.natural_stack_alignment(), 16);
//! ```
//!
//! ## Features
//!
//! - **16-byte operands** — every variant is exactly four packed 32-bit
//!   words, trivially copyable, allocation-free, and comparable bitwise.
//! - **One id space** — physical registers, virtual registers, and labels
//!   share a single `u32` id namespace split by magnitude.
//! - **Multi-arch** — x86, x86-64, AArch64 calling conventions
//!   (feature-gated).
//! - **`no_std`** — usable without the standard library, no `alloc`
//!   required.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
// ── Lint policy ──────────────────────────────────────────────────────────
// Packing operands into 32-bit words intentionally performs many
// narrowing / sign-changing casts between integer widths (u64→u32,
// u32→i8, etc.) and uses dense hex literals without separators.  The
// lints below are expected and acceptable in this context.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::cast_possible_wrap,
    clippy::unreadable_literal,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::missing_panics_doc,
    clippy::return_self_not_must_use
)]

#[cfg(feature = "aarch64")]
pub mod aarch64;
/// Calling-convention descriptor and architecture-family dispatch.
pub mod callconv;
/// Error types.
pub mod error;
/// Operand data model: registers, memory references, immediates, labels.
pub mod operand;
#[cfg(any(feature = "x86", feature = "x86_64"))]
pub mod x86;

// Re-exports
pub use callconv::{Arch, CallConv, CallConvId, CallConvStrategy};
pub use error::Error;
pub use operand::{
    reg_signature, sig, AddrType, Imm, Label, LabelType, Mem, OpType, Operand, Reg, RegGroup,
    RegOnly, RegType,
};

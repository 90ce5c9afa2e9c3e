//! Calling-convention descriptor and architecture-family dispatch.
//!
//! A [`CallConv`] is a small by-value descriptor populated once per
//! function or target via [`CallConv::init`] and consulted later when
//! lowering calls: which registers carry arguments in which order, which
//! registers a callee must preserve, and how the stack is laid out around
//! a call. The rule tables themselves live in the architecture modules
//! and are compiled in per family.

use crate::error::Error;
use crate::operand::RegGroup;

// ─── Convention ids ──────────────────────────────────────────────────────────

/// Calling-convention identifier.
///
/// Ids are plain integers partitioned into architecture-family ranges, so
/// an id arriving from external configuration can be classified without a
/// lookup table. All ids are defined unconditionally; whether a family is
/// actually available is decided by [`CallConv::init`] based on the
/// compiled-in features.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallConvId(u32);

impl CallConvId {
    /// No convention selected.
    pub const NONE: CallConvId = CallConvId(0);

    /// X86 `__cdecl`: all arguments on the stack, caller cleans up.
    pub const X86_CDECL: CallConvId = CallConvId(1);
    /// X86 `__stdcall`: all arguments on the stack, callee cleans up.
    pub const X86_STD_CALL: CallConvId = CallConvId(2);
    /// MSVC `__thiscall`: `this` in ECX, callee cleans up.
    pub const X86_MS_THIS_CALL: CallConvId = CallConvId(3);
    /// MSVC `__fastcall`: first two args in ECX:EDX, callee cleans up.
    pub const X86_MS_FAST_CALL: CallConvId = CallConvId(4);
    /// GCC `__fastcall`, compatible with the MSVC variant.
    pub const X86_GCC_FAST_CALL: CallConvId = CallConvId(5);
    /// GCC `regparm(1)`.
    pub const X86_GCC_REG_PARM_1: CallConvId = CallConvId(6);
    /// GCC `regparm(2)`.
    pub const X86_GCC_REG_PARM_2: CallConvId = CallConvId(7);
    /// GCC `regparm(3)`.
    pub const X86_GCC_REG_PARM_3: CallConvId = CallConvId(8);
    /// X86 internal convention preserving all but 2 vector registers.
    pub const X86_LIGHT_CALL_2: CallConvId = CallConvId(9);
    /// X86 internal convention preserving all but 3 vector registers.
    pub const X86_LIGHT_CALL_3: CallConvId = CallConvId(10);
    /// X86 internal convention preserving all but 4 vector registers.
    pub const X86_LIGHT_CALL_4: CallConvId = CallConvId(11);
    /// X86-64 System V ABI (Linux, BSD, macOS).
    pub const X86_SYS_V64: CallConvId = CallConvId(12);
    /// X86-64 Windows ABI.
    pub const X86_WIN64: CallConvId = CallConvId(13);
    /// X86-64 internal convention preserving all but 2 vector registers.
    pub const X64_LIGHT_CALL_2: CallConvId = CallConvId(14);
    /// X86-64 internal convention preserving all but 3 vector registers.
    pub const X64_LIGHT_CALL_3: CallConvId = CallConvId(15);
    /// X86-64 internal convention preserving all but 4 vector registers.
    pub const X64_LIGHT_CALL_4: CallConvId = CallConvId(16);
    /// AArch64 AAPCS64.
    pub const AARCH64_AAPCS: CallConvId = CallConvId(17);

    const X86_FAMILY_FIRST: u32 = 1;
    const X86_FAMILY_LAST: u32 = 16;
    const AARCH64_FAMILY_FIRST: u32 = 17;
    const AARCH64_FAMILY_LAST: u32 = 17;

    /// Wrap a raw convention id, typically one received from external
    /// configuration. No validation happens here; [`CallConv::init`]
    /// rejects ids outside every compiled-in family.
    #[must_use]
    pub const fn from_raw(raw: u32) -> CallConvId {
        CallConvId(raw)
    }

    /// The raw id value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// Whether the id belongs to the x86/x86-64 family range.
    #[must_use]
    pub const fn is_x86_family(self) -> bool {
        self.0 >= CallConvId::X86_FAMILY_FIRST && self.0 <= CallConvId::X86_FAMILY_LAST
    }

    /// Whether the id belongs to the AArch64 family range.
    #[must_use]
    pub const fn is_aarch64_family(self) -> bool {
        self.0 >= CallConvId::AARCH64_FAMILY_FIRST && self.0 <= CallConvId::AARCH64_FAMILY_LAST
    }

    /// The default convention of the compilation host.
    ///
    /// Resolves at compile time from the target triple. Returns
    /// [`CallConvId::NONE`] on hosts without a supported family.
    #[must_use]
    pub const fn host() -> CallConvId {
        if cfg!(all(target_arch = "x86_64", target_os = "windows")) {
            CallConvId::X86_WIN64
        } else if cfg!(target_arch = "x86_64") {
            CallConvId::X86_SYS_V64
        } else if cfg!(target_arch = "x86") {
            CallConvId::X86_CDECL
        } else if cfg!(target_arch = "aarch64") {
            CallConvId::AARCH64_AAPCS
        } else {
            CallConvId::NONE
        }
    }
}

// ─── Architecture tag ────────────────────────────────────────────────────────

/// Architecture a calling convention belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum Arch {
    /// Not initialized.
    #[default]
    None = 0,
    /// 32-bit x86.
    X86 = 1,
    /// 64-bit x86.
    X64 = 2,
    /// ARMv8-A 64-bit.
    Aarch64 = 3,
}

impl core::fmt::Display for Arch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Arch::None => write!(f, "none"),
            Arch::X86 => write!(f, "x86"),
            Arch::X64 => write!(f, "x86_64"),
            Arch::Aarch64 => write!(f, "AArch64"),
        }
    }
}

/// Strategy used to assign registers and stack slots to arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum CallConvStrategy {
    /// Assign in the order the convention's tables describe.
    #[default]
    Default = 0,
    /// Windows x64 specific: argument index n always maps to slot n.
    Win64 = 1,
}

// ─── Descriptor ──────────────────────────────────────────────────────────────

/// Count of register groups the descriptor tracks per convention.
const GROUP_COUNT: usize = 4;

/// Count of argument-register slots tracked per group.
const REG_ARG_COUNT: usize = 8;

/// Calling-convention descriptor.
///
/// Has exactly two states. After [`CallConv::reset`] (or construction)
/// every field reads zero. After a successful [`CallConv::init`] the rules
/// of one specific convention are populated, with unused argument slots
/// marked [`CallConv::NO_REG`]. A failed `init` leaves the descriptor
/// reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CallConv {
    id: CallConvId,
    arch: Arch,
    strategy: CallConvStrategy,
    flags: u8,
    red_zone_size: u8,
    spill_zone_size: u8,
    natural_stack_alignment: u8,
    passed_order: [[u8; REG_ARG_COUNT]; GROUP_COUNT],
    passed_regs: [u32; GROUP_COUNT],
    preserved_regs: [u32; GROUP_COUNT],
}

impl CallConv {
    /// Maximum number of argument registers tracked per group.
    pub const MAX_REG_ARGS: usize = REG_ARG_COUNT;

    /// Marks an unused slot in a passed-order row.
    pub const NO_REG: u8 = 0xFF;

    /// Callee cleans up the stack (stdcall, thiscall, fastcall).
    pub const FLAG_CALLEE_POPS_STACK: u8 = 0x01;
    /// Floating point arguments travel in vector registers.
    pub const FLAG_PASS_FLOATS_BY_VEC: u8 = 0x02;
    /// MSVC `__vectorcall`.
    pub const FLAG_VECTOR_CALL: u8 = 0x04;
    /// Vector arguments are passed indirectly by pointer (Win64).
    pub const FLAG_INDIRECT_VEC_ARGS: u8 = 0x08;

    /// Create an uninitialized descriptor (all fields zero).
    #[must_use]
    pub const fn new() -> CallConv {
        CallConv {
            id: CallConvId::NONE,
            arch: Arch::None,
            strategy: CallConvStrategy::Default,
            flags: 0,
            red_zone_size: 0,
            spill_zone_size: 0,
            natural_stack_alignment: 0,
            passed_order: [[0; CallConv::MAX_REG_ARGS]; GROUP_COUNT],
            passed_regs: [0; GROUP_COUNT],
            preserved_regs: [0; GROUP_COUNT],
        }
    }

    /// Reset the descriptor to the uninitialized all-zero state.
    pub fn reset(&mut self) {
        *self = CallConv::new();
    }

    /// Initialize the descriptor from a convention id.
    ///
    /// Resets first, so re-initialization is idempotent, then classifies
    /// the id by architecture family and delegates to exactly one family
    /// initializer. Families are compiled in conditionally; an id that
    /// matches no compiled-in family fails and the descriptor stays reset.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] when `id` is outside every compiled-in
    /// family range.
    pub fn init(&mut self, id: CallConvId) -> Result<(), Error> {
        self.reset();
        // Argument slots start out unused; initializers fill in the rows
        // their convention defines.
        self.passed_order = [[CallConv::NO_REG; CallConv::MAX_REG_ARGS]; GROUP_COUNT];

        let result = self.init_dispatch(id);
        if result.is_err() {
            self.reset();
        }
        result
    }

    fn init_dispatch(&mut self, id: CallConvId) -> Result<(), Error> {
        #[cfg(any(feature = "x86", feature = "x86_64"))]
        if id.is_x86_family() {
            return crate::x86::init_call_conv(self, id);
        }

        #[cfg(feature = "aarch64")]
        if id.is_aarch64_family() {
            return crate::aarch64::init_call_conv(self, id);
        }

        let _ = id;
        Err(Error::InvalidArgument {
            what: "unrecognized calling convention id",
        })
    }

    /// Whether the descriptor holds the rules of some convention.
    #[must_use]
    pub const fn is_initialized(&self) -> bool {
        self.id.raw() != 0
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// The convention id, [`CallConvId::NONE`] when uninitialized.
    #[must_use]
    pub const fn id(&self) -> CallConvId {
        self.id
    }

    /// Set the convention id.
    pub fn set_id(&mut self, id: CallConvId) {
        self.id = id;
    }

    /// The architecture the convention belongs to.
    #[must_use]
    pub const fn arch(&self) -> Arch {
        self.arch
    }

    /// Set the architecture tag.
    pub fn set_arch(&mut self, arch: Arch) {
        self.arch = arch;
    }

    /// The argument assignment strategy.
    #[must_use]
    pub const fn strategy(&self) -> CallConvStrategy {
        self.strategy
    }

    /// Set the argument assignment strategy.
    pub fn set_strategy(&mut self, strategy: CallConvStrategy) {
        self.strategy = strategy;
    }

    /// Convention flags, a combination of the `FLAG_*` constants.
    #[must_use]
    pub const fn flags(&self) -> u8 {
        self.flags
    }

    /// Whether all bits of `flag` are set.
    #[must_use]
    pub const fn has_flag(&self, flag: u8) -> bool {
        (self.flags & flag) == flag
    }

    /// Replace the flags.
    pub fn set_flags(&mut self, flags: u8) {
        self.flags = flags;
    }

    /// Add to the flags.
    pub fn add_flags(&mut self, flags: u8) {
        self.flags |= flags;
    }

    /// Size in bytes of the red zone below the stack pointer.
    #[must_use]
    pub const fn red_zone_size(&self) -> u32 {
        self.red_zone_size as u32
    }

    /// Set the red zone size.
    pub fn set_red_zone_size(&mut self, size: u8) {
        self.red_zone_size = size;
    }

    /// Size in bytes of the spill zone (home area) above the return
    /// address, as required by Win64.
    #[must_use]
    pub const fn spill_zone_size(&self) -> u32 {
        self.spill_zone_size as u32
    }

    /// Set the spill zone size.
    pub fn set_spill_zone_size(&mut self, size: u8) {
        self.spill_zone_size = size;
    }

    /// Natural stack alignment in bytes at call boundaries.
    #[must_use]
    pub const fn natural_stack_alignment(&self) -> u32 {
        self.natural_stack_alignment as u32
    }

    /// Set the natural stack alignment.
    pub fn set_natural_stack_alignment(&mut self, alignment: u8) {
        self.natural_stack_alignment = alignment;
    }

    /// The argument register order of `group`. Slots read
    /// [`CallConv::NO_REG`] where the convention passes no more arguments
    /// in registers of that group.
    ///
    /// `group` must be below [`RegGroup::VIRT`].
    #[must_use]
    pub fn passed_order(&self, group: RegGroup) -> &[u8; CallConv::MAX_REG_ARGS] {
        debug_assert!(group.index() < GROUP_COUNT);
        &self.passed_order[group.index()]
    }

    /// Set the argument register order of `group`. At most
    /// [`CallConv::MAX_REG_ARGS`] registers; remaining slots are marked
    /// unused. Also records the passed-register mask of the group.
    pub fn set_passed_order(&mut self, group: RegGroup, regs: &[u8]) {
        debug_assert!(group.index() < GROUP_COUNT);
        debug_assert!(regs.len() <= CallConv::MAX_REG_ARGS);

        let row = &mut self.passed_order[group.index()];
        *row = [CallConv::NO_REG; CallConv::MAX_REG_ARGS];
        row[..regs.len()].copy_from_slice(regs);

        let mut mask = 0u32;
        for &id in regs {
            mask |= 1 << id;
        }
        self.passed_regs[group.index()] = mask;
    }

    /// Mask of registers of `group` used to pass arguments.
    #[must_use]
    pub fn passed_regs(&self, group: RegGroup) -> u32 {
        debug_assert!(group.index() < GROUP_COUNT);
        self.passed_regs[group.index()]
    }

    /// Mask of registers of `group` a callee must preserve.
    #[must_use]
    pub fn preserved_regs(&self, group: RegGroup) -> u32 {
        debug_assert!(group.index() < GROUP_COUNT);
        self.preserved_regs[group.index()]
    }

    /// Set the preserved-register mask of `group`.
    pub fn set_preserved_regs(&mut self, group: RegGroup, mask: u32) {
        debug_assert!(group.index() < GROUP_COUNT);
        self.preserved_regs[group.index()] = mask;
    }
}

impl Default for CallConv {
    fn default() -> CallConv {
        CallConv::new()
    }
}

// ─── Mask helpers ────────────────────────────────────────────────────────────

/// Bit mask with one bit set per register id in `ids`.
#[allow(dead_code)]
pub(crate) const fn reg_mask(ids: &[u8]) -> u32 {
    let mut mask = 0u32;
    let mut i = 0;
    while i < ids.len() {
        mask |= 1 << ids[i];
        i += 1;
    }
    mask
}

/// Mask of the `n` least significant bits.
#[allow(dead_code)]
pub(crate) const fn lsb_mask(n: u32) -> u32 {
    if n >= 32 {
        u32::MAX
    } else {
        (1u32 << n) - 1
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

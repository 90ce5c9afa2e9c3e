//! Operand data model: registers, memory references, immediates, and labels.
//!
//! Every operand variant shares one physical layout: four packed 32-bit
//! words, 16 bytes total. Word 0 is always the **signature** (a bitfield
//! classifying the operand, see [`sig`]), word 1 is always the **id**
//! (except [`Mem`], where it doubles as the base id or the high half of a
//! 64-bit offset). The remaining two words carry variant-specific payload.
//!
//! All types here are plain `Copy` values with no heap state. They are
//! created and compared at very high frequency during code emission, so
//! everything is kept branch-light and allocation-free.

use core::fmt;

// ─── Signature bit layout ────────────────────────────────────────────────────

/// Bit layout of the 32-bit operand signature.
///
/// Fields are read and written as `(value >> SHIFT) & BITS`. The memory
/// base/index fields deliberately alias the register type/group windows so
/// that a base field can hold either a register type or the label tag, and
/// a combined base+index read is a single mask.
///
/// ```text
/// |SSSSSSSS|........|HAAIIIII|BBBBBTTT|   S = size (8)
///                                         H = mem reg-home flag (1)
///                                         A = mem address type (2)
///                                         I = mem index type (5) / reg group (4)
///                                         B = mem base type (5) / reg type (5)
///                                         T = operand type (3)
/// ```
pub mod sig {
    /// Operand type (3 least significant bits).
    pub const OP_TYPE_SHIFT: u32 = 0;
    /// Operand type field width mask (unshifted).
    pub const OP_TYPE_BITS: u32 = 0x07;
    /// Operand type mask (shifted into place).
    pub const OP_TYPE_MASK: u32 = OP_TYPE_BITS << OP_TYPE_SHIFT;

    /// Register type (5 bits).
    pub const REG_TYPE_SHIFT: u32 = 3;
    pub const REG_TYPE_BITS: u32 = 0x1F;
    pub const REG_TYPE_MASK: u32 = REG_TYPE_BITS << REG_TYPE_SHIFT;

    /// Register group (4 bits).
    pub const REG_GROUP_SHIFT: u32 = 8;
    pub const REG_GROUP_BITS: u32 = 0x0F;
    pub const REG_GROUP_MASK: u32 = REG_GROUP_BITS << REG_GROUP_SHIFT;

    /// Memory base type (5 bits, same window as the register type).
    pub const MEM_BASE_TYPE_SHIFT: u32 = 3;
    pub const MEM_BASE_TYPE_BITS: u32 = 0x1F;
    pub const MEM_BASE_TYPE_MASK: u32 = MEM_BASE_TYPE_BITS << MEM_BASE_TYPE_SHIFT;

    /// Memory index type (5 bits).
    pub const MEM_INDEX_TYPE_SHIFT: u32 = 8;
    pub const MEM_INDEX_TYPE_BITS: u32 = 0x1F;
    pub const MEM_INDEX_TYPE_MASK: u32 = MEM_INDEX_TYPE_BITS << MEM_INDEX_TYPE_SHIFT;

    /// Memory base and index types combined (10 bits, one-mask read).
    pub const MEM_BASE_INDEX_SHIFT: u32 = 3;
    pub const MEM_BASE_INDEX_BITS: u32 = 0x3FF;
    pub const MEM_BASE_INDEX_MASK: u32 = MEM_BASE_INDEX_BITS << MEM_BASE_INDEX_SHIFT;

    /// Memory address type (2 bits).
    pub const MEM_ADDR_TYPE_SHIFT: u32 = 13;
    pub const MEM_ADDR_TYPE_BITS: u32 = 0x03;
    pub const MEM_ADDR_TYPE_MASK: u32 = MEM_ADDR_TYPE_BITS << MEM_ADDR_TYPE_SHIFT;

    /// Marks a memory operand that is a register home slot (spill slot).
    pub const MEM_REG_HOME_SHIFT: u32 = 15;
    pub const MEM_REG_HOME_BITS: u32 = 0x01;
    pub const MEM_REG_HOME_FLAG: u32 = MEM_REG_HOME_BITS << MEM_REG_HOME_SHIFT;

    // Bits 16..24 are reserved and kept zero by this crate.

    /// Operand size in bytes (8 most significant bits).
    pub const SIZE_SHIFT: u32 = 24;
    pub const SIZE_BITS: u32 = 0xFF;
    pub const SIZE_MASK: u32 = SIZE_BITS << SIZE_SHIFT;
}

/// Build a register signature from its type, group, and size in bytes.
///
/// This is the canonical encoding every architecture module uses to define
/// its concrete register kinds.
#[must_use]
pub const fn reg_signature(ty: RegType, group: RegGroup, size: u32) -> u32 {
    (OpType::Reg as u32) << sig::OP_TYPE_SHIFT
        | (ty.bits() << sig::REG_TYPE_SHIFT)
        | (group.bits() << sig::REG_GROUP_SHIFT)
        | (size << sig::SIZE_SHIFT)
}

// ─── Operand type ────────────────────────────────────────────────────────────

/// Operand type tag stored in the low 3 bits of the signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum OpType {
    /// Not an operand, or not initialized.
    None = 0,
    /// Operand is a register.
    Reg = 1,
    /// Operand is a memory reference.
    Mem = 2,
    /// Operand is an immediate value.
    Imm = 3,
    /// Operand is a label.
    Label = 4,
}

// Base/index type codes double as register types and compare against the
// label tag, which requires Mem to directly follow Reg.
const _: () = assert!(OpType::Mem as u32 == OpType::Reg as u32 + 1);

impl OpType {
    /// Decode a 3-bit operand type field. Unknown codes decode to `None`.
    #[must_use]
    pub const fn from_bits(bits: u32) -> OpType {
        match bits & sig::OP_TYPE_BITS {
            1 => OpType::Reg,
            2 => OpType::Mem,
            3 => OpType::Imm,
            4 => OpType::Label,
            _ => OpType::None,
        }
    }
}

impl fmt::Display for OpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpType::None => write!(f, "none"),
            OpType::Reg => write!(f, "reg"),
            OpType::Mem => write!(f, "mem"),
            OpType::Imm => write!(f, "imm"),
            OpType::Label => write!(f, "label"),
        }
    }
}

// ─── Register taxonomy ───────────────────────────────────────────────────────

/// Architecture-neutral register type (5-bit signature field).
///
/// Codes 2..=15 are the neutral set shared by all backends; an architecture
/// module may claim codes from [`RegType::CUSTOM`] up to [`RegType::MAX`]
/// for its own kinds. Code 1 is never a register type. It is reserved as
/// [`Label::TAG`] so a memory operand's base field can hold either a
/// register type or a label tag in the same slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegType(u8);

impl RegType {
    /// No register. Also the "no base" marker in memory operands.
    pub const NONE: RegType = RegType(0);
    /// 8-bit low general purpose register.
    pub const GP8_LO: RegType = RegType(2);
    /// 8-bit high general purpose register.
    pub const GP8_HI: RegType = RegType(3);
    /// 16-bit general purpose register.
    pub const GP16: RegType = RegType(4);
    /// 32-bit general purpose register.
    pub const GP32: RegType = RegType(5);
    /// 64-bit general purpose register.
    pub const GP64: RegType = RegType(6);
    /// 32-bit view of a vector register.
    pub const VEC32: RegType = RegType(7);
    /// 64-bit view of a vector register.
    pub const VEC64: RegType = RegType(8);
    /// 128-bit view of a vector register.
    pub const VEC128: RegType = RegType(9);
    /// 256-bit view of a vector register.
    pub const VEC256: RegType = RegType(10);
    /// 512-bit view of a vector register.
    pub const VEC512: RegType = RegType(11);
    /// 1024-bit view of a vector register.
    pub const VEC1024: RegType = RegType(12);
    /// First architecture-specific "other" slot, must match group `OTHER0`.
    pub const OTHER0: RegType = RegType(13);
    /// Second architecture-specific "other" slot, must match group `OTHER1`.
    pub const OTHER1: RegType = RegType(14);
    /// Instruction pointer / program counter, where architecturally separate.
    pub const IP: RegType = RegType(15);
    /// First register type an architecture extension may claim.
    pub const CUSTOM: RegType = RegType(16);
    /// Hard ceiling dictated by the 5-bit field width.
    pub const MAX: RegType = RegType(31);

    /// Decode a 5-bit register type field.
    #[must_use]
    pub const fn from_bits(bits: u32) -> RegType {
        RegType((bits & sig::REG_TYPE_BITS) as u8)
    }

    /// The `index`-th architecture extension type, counted from
    /// [`RegType::CUSTOM`]. `index` must stay below 16 so the code fits
    /// the 5-bit field.
    #[must_use]
    pub const fn custom(index: u8) -> RegType {
        assert!(index < 16, "custom register type beyond the 5-bit field");
        RegType(16 + index)
    }

    /// Raw 5-bit field value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Register group canonically associated with this neutral type.
    ///
    /// Types outside the neutral set map to the general purpose group;
    /// architecture extensions define their own grouping.
    #[must_use]
    pub const fn canonical_group(self) -> RegGroup {
        match self.0 {
            7..=12 => RegGroup::VEC,
            13 => RegGroup::OTHER0,
            14 => RegGroup::OTHER1,
            15 => RegGroup::VIRT,
            _ => RegGroup::GP,
        }
    }

    /// Size in bytes of the canonical view of this neutral type.
    ///
    /// Instruction-pointer registers report zero, matching the rule that a
    /// register with architecture-dependent width reports its largest form
    /// through the architecture module instead.
    #[must_use]
    pub const fn canonical_size(self) -> u32 {
        match self.0 {
            2 | 3 => 1,
            4 => 2,
            5 | 7 => 4,
            6 | 8 => 8,
            9 => 16,
            10 => 32,
            11 => 64,
            12 => 128,
            _ => 0,
        }
    }

    /// Canonical operand signature for a register of this neutral type.
    ///
    /// Returns zero for `NONE` and for extension types; those get their
    /// signatures from the architecture module that claimed them.
    #[must_use]
    pub const fn signature(self) -> u32 {
        match self.0 {
            2..=15 => reg_signature(self, self.canonical_group(), self.canonical_size()),
            _ => 0,
        }
    }
}

impl fmt::Display for RegType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "none"),
            2 => write!(f, "gp8lo"),
            3 => write!(f, "gp8hi"),
            4 => write!(f, "gp16"),
            5 => write!(f, "gp32"),
            6 => write!(f, "gp64"),
            7 => write!(f, "vec32"),
            8 => write!(f, "vec64"),
            9 => write!(f, "vec128"),
            10 => write!(f, "vec256"),
            11 => write!(f, "vec512"),
            12 => write!(f, "vec1024"),
            13 => write!(f, "other0"),
            14 => write!(f, "other1"),
            15 => write!(f, "ip"),
            n if n >= 16 => write!(f, "custom{}", n - 16),
            n => write!(f, "reserved{n}"),
        }
    }
}

/// Architecture-neutral register group (4-bit signature field).
///
/// Coarsens [`RegType`] into classes used for fast membership checks that
/// are independent of exact register width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RegGroup(u8);

impl RegGroup {
    /// General purpose registers, compatible with all backends.
    pub const GP: RegGroup = RegGroup(0);
    /// Vector registers, compatible with all backends.
    pub const VEC: RegGroup = RegGroup(1);
    /// First architecture-specific group.
    pub const OTHER0: RegGroup = RegGroup(2);
    /// Second architecture-specific group.
    pub const OTHER1: RegGroup = RegGroup(3);
    /// Count of groups a virtual-register allocator tracks. Also the first
    /// group code an architecture may claim for physical-only register files.
    pub const VIRT: RegGroup = RegGroup(4);
    /// Count of groups usable by physical registers (field ceiling).
    pub const COUNT: RegGroup = RegGroup(16);

    /// Decode a 4-bit register group field.
    #[must_use]
    pub const fn from_bits(bits: u32) -> RegGroup {
        RegGroup((bits & sig::REG_GROUP_BITS) as u8)
    }

    /// Raw 4-bit field value.
    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0 as u32
    }

    /// Index usable for per-group tables sized [`RegGroup::VIRT`].
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for RegGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => write!(f, "gp"),
            1 => write!(f, "vec"),
            2 => write!(f, "other0"),
            3 => write!(f, "other1"),
            n => write!(f, "group{n}"),
        }
    }
}

// ─── Operand ─────────────────────────────────────────────────────────────────

/// Operand: a register, memory reference, immediate constant, or label.
///
/// Exactly 16 bytes and trivially copyable. Equality is bitwise over the
/// full 16 bytes, so a freshly reset operand compares equal to
/// [`Operand::NONE`] and operands can be compared without inspecting their
/// variant first.
///
/// The packed layout is a stable binary contract: components that persist
/// or inspect operands may read the four words directly (see
/// [`Operand::words`]) and decode fields by masked shift as documented in
/// [`sig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Operand {
    signature: u32,
    id: u32,
    data: [u32; 2],
}

const _: () = assert!(core::mem::size_of::<Operand>() == 16);
const _: () = assert!(core::mem::align_of::<Operand>() == 4);

impl Operand {
    /// The canonical none operand (all 16 bytes zero).
    pub const NONE: Operand = Operand {
        signature: 0,
        id: 0,
        data: [0, 0],
    };

    /// Minimum valid packed id. Ids at or above this value denote virtual
    /// registers or labels, never physical registers.
    pub const PACKED_ID_MIN: u32 = 0x0000_0100;
    /// Maximum valid packed id.
    pub const PACKED_ID_MAX: u32 = 0xFFFF_FFFF;

    /// Create a none operand.
    #[must_use]
    pub const fn new() -> Operand {
        Operand::NONE
    }

    /// Create an operand from its four raw words.
    ///
    /// This is the binary contract surface. No validation is performed;
    /// the caller is responsible for producing a meaningful signature.
    #[must_use]
    pub const fn from_words(signature: u32, id: u32, d2: u32, d3: u32) -> Operand {
        Operand {
            signature,
            id,
            data: [d2, d3],
        }
    }

    /// The four raw words of this operand.
    #[must_use]
    pub const fn words(&self) -> [u32; 4] {
        [self.signature, self.id, self.data[0], self.data[1]]
    }

    /// Reset the operand to none (all words zero).
    pub fn reset(&mut self) {
        *self = Operand::NONE;
    }

    // ── Signature access ────────────────────────────────────────────────

    /// The 32-bit operand signature.
    ///
    /// The signature is the first word of the operand. Checking it as a
    /// whole is much faster than checking fields individually, which is
    /// why variant tests below compare masked signatures directly.
    #[must_use]
    pub const fn signature(&self) -> u32 {
        self.signature
    }

    /// Replace the whole signature word.
    ///
    /// Improper use can produce an operand whose fields contradict each
    /// other; prefer the typed setters on the variant types.
    pub fn set_signature(&mut self, signature: u32) {
        self.signature = signature;
    }

    /// Whether the signature equals `signature` exactly.
    #[must_use]
    pub const fn has_signature(&self, signature: u32) -> bool {
        self.signature == signature
    }

    /// Whether this operand and `other` share the same signature.
    #[must_use]
    pub const fn has_signature_of(&self, other: &Operand) -> bool {
        self.signature == other.signature
    }

    /// Read a signature sub-field as `(signature >> shift) & bits`.
    #[must_use]
    pub const fn signature_data(&self, bits: u32, shift: u32) -> u32 {
        (self.signature >> shift) & bits
    }

    /// Whether any of the (shifted) `mask` bits are set in the signature.
    #[must_use]
    pub const fn has_signature_data(&self, mask: u32) -> bool {
        (self.signature & mask) != 0
    }

    /// Write a signature sub-field, preserving all other fields.
    ///
    /// `value` must fit in `bits`. Violations are caught by a debug
    /// assertion; release builds perform the masked write regardless and
    /// would corrupt adjacent fields, so this is a programmer-error guard
    /// rather than input validation.
    pub fn set_signature_data(&mut self, value: u32, bits: u32, shift: u32) {
        debug_assert!(value <= bits, "signature field value does not fit");
        self.signature = (self.signature & !(bits << shift)) | (value << shift);
    }

    /// Set the (pre-shifted) `mask` bits in the signature.
    pub fn add_signature_data(&mut self, mask: u32) {
        self.signature |= mask;
    }

    /// Clear a signature sub-field.
    pub fn clear_signature_data(&mut self, bits: u32, shift: u32) {
        self.signature &= !(bits << shift);
    }

    // ── Variant tests ───────────────────────────────────────────────────

    /// The operand type tag.
    #[must_use]
    pub const fn op_type(&self) -> OpType {
        OpType::from_bits(self.signature)
    }

    /// Whether the operand is none (zero signature).
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.signature == 0
    }

    /// Whether the operand is a register.
    #[must_use]
    pub const fn is_reg(&self) -> bool {
        matches!(self.op_type(), OpType::Reg)
    }

    /// Whether the operand is a memory reference.
    #[must_use]
    pub const fn is_mem(&self) -> bool {
        matches!(self.op_type(), OpType::Mem)
    }

    /// Whether the operand is an immediate.
    #[must_use]
    pub const fn is_imm(&self) -> bool {
        matches!(self.op_type(), OpType::Imm)
    }

    /// Whether the operand is a label.
    #[must_use]
    pub const fn is_label(&self) -> bool {
        matches!(self.op_type(), OpType::Label)
    }

    /// Whether the operand is a register or a memory reference.
    #[must_use]
    pub const fn is_reg_or_mem(&self) -> bool {
        matches!(self.op_type(), OpType::Reg | OpType::Mem)
    }

    /// Whether the operand is a register of the given type, checked with a
    /// single masked compare of the signature.
    #[must_use]
    pub const fn is_reg_type(&self, ty: RegType) -> bool {
        (self.signature & (sig::OP_TYPE_MASK | sig::REG_TYPE_MASK))
            == ((OpType::Reg as u32) << sig::OP_TYPE_SHIFT | ty.bits() << sig::REG_TYPE_SHIFT)
    }

    /// Whether the operand is a register of the given type and id.
    #[must_use]
    pub const fn is_reg_type_id(&self, ty: RegType, id: u32) -> bool {
        self.is_reg_type(ty) && self.id == id
    }

    /// Whether the operand is a physical register (id below [`Reg::ID_BAD`]).
    #[must_use]
    pub const fn is_phys_reg(&self) -> bool {
        self.is_reg() && self.id < Reg::ID_BAD
    }

    /// Whether the operand is a virtual register (id above [`Reg::ID_BAD`]).
    #[must_use]
    pub const fn is_virt_reg(&self) -> bool {
        self.is_reg() && self.id > Reg::ID_BAD
    }

    // ── Size and id ─────────────────────────────────────────────────────

    /// Operand size in bytes.
    ///
    /// Zero for none, immediates, and labels. For registers it is the size
    /// of the register, reporting the architecturally largest variant when
    /// the width depends on the target. For memory operands the size is
    /// optional and usually zero.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.signature_data(sig::SIZE_BITS, sig::SIZE_SHIFT)
    }

    /// Whether the operand specifies a nonzero size.
    #[must_use]
    pub const fn has_size(&self) -> bool {
        self.has_signature_data(sig::SIZE_MASK)
    }

    /// Whether the operand size equals `size` bytes.
    #[must_use]
    pub const fn has_size_of(&self, size: u32) -> bool {
        self.size() == size
    }

    /// The operand id word.
    ///
    /// Interpretation depends on the operand type: zero for none and
    /// immediates, a physical or virtual register id for registers, the
    /// base id or high offset half for memory references, and the label id
    /// for labels.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    // ── Packed ids ──────────────────────────────────────────────────────

    /// Whether `id` lies in the packed-id namespace reserved for virtual
    /// registers and labels.
    ///
    /// Packed ids never collide with physical register indices, so a
    /// single `u32` can denote either kind depending only on magnitude.
    #[must_use]
    pub const fn is_packed_id(id: u32) -> bool {
        id >= Operand::PACKED_ID_MIN
    }

    /// Convert a real (allocator-local) id into a packed id.
    #[must_use]
    pub const fn pack_id(id: u32) -> u32 {
        id + Operand::PACKED_ID_MIN
    }

    /// Convert a packed id back into a real id.
    #[must_use]
    pub const fn unpack_id(id: u32) -> u32 {
        id - Operand::PACKED_ID_MIN
    }

    // ── Variant views ───────────────────────────────────────────────────

    /// View this operand as a register, if it is one.
    #[must_use]
    pub const fn as_reg(&self) -> Option<Reg> {
        if self.is_reg() {
            Some(Reg(*self))
        } else {
            None
        }
    }

    /// View this operand as a memory reference, if it is one.
    #[must_use]
    pub const fn as_mem(&self) -> Option<Mem> {
        if self.is_mem() {
            Some(Mem(*self))
        } else {
            None
        }
    }

    /// View this operand as an immediate, if it is one.
    #[must_use]
    pub const fn as_imm(&self) -> Option<Imm> {
        if self.is_imm() {
            Some(Imm(*self))
        } else {
            None
        }
    }

    /// View this operand as a label, if it is one.
    #[must_use]
    pub const fn as_label(&self) -> Option<Label> {
        if self.is_label() {
            Some(Label(*self))
        } else {
            None
        }
    }
}

impl Default for Operand {
    fn default() -> Operand {
        Operand::NONE
    }
}

impl From<Reg> for Operand {
    fn from(reg: Reg) -> Operand {
        reg.0
    }
}

impl From<Mem> for Operand {
    fn from(mem: Mem) -> Operand {
        mem.0
    }
}

impl From<Imm> for Operand {
    fn from(imm: Imm) -> Operand {
        imm.0
    }
}

impl From<Label> for Operand {
    fn from(label: Label) -> Operand {
        label.0
    }
}

// ─── Reg ─────────────────────────────────────────────────────────────────────

/// Physical or virtual register operand.
///
/// Registers only use the first 8 bytes of the operand (signature and id);
/// the upper 8 bytes are always zero when constructed through this type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Reg(Operand);

impl Reg {
    /// Id of a non-existent register. Ids below are physical register
    /// indices, ids above are virtual register handles.
    pub const ID_BAD: u32 = 0xFF;

    /// Create an invalid (none) register.
    #[must_use]
    pub const fn new() -> Reg {
        Reg(Operand::NONE)
    }

    /// Create a register from a full signature and an id.
    #[must_use]
    pub const fn from_signature_and_id(signature: u32, id: u32) -> Reg {
        Reg(Operand::from_words(signature, id, 0, 0))
    }

    /// Create a register of a neutral type with the given id, using the
    /// type's canonical signature.
    #[must_use]
    pub const fn from_type_and_id(ty: RegType, id: u32) -> Reg {
        Reg::from_signature_and_id(ty.signature(), id)
    }

    /// Copy of `self` with a different id.
    #[must_use]
    pub const fn with_id(&self, id: u32) -> Reg {
        Reg::from_signature_and_id(self.0.signature, id)
    }

    /// Retype this register while preserving its id.
    ///
    /// Swaps in the target type's canonical signature, so a 32-bit view of
    /// a general purpose register can be widened to its 64-bit view without
    /// touching its identity. The type must be one of the neutral kinds;
    /// for architecture extension types use [`Reg::clone_as_signature`].
    #[must_use]
    pub const fn clone_as(&self, ty: RegType) -> Reg {
        Reg::from_signature_and_id(ty.signature(), self.0.id)
    }

    /// Retype this register to the exact signature of `other`.
    #[must_use]
    pub const fn clone_as_reg(&self, other: &Reg) -> Reg {
        Reg::from_signature_and_id(other.0.signature, self.0.id)
    }

    /// Retype this register to a raw signature while preserving its id.
    #[must_use]
    pub const fn clone_as_signature(&self, signature: u32) -> Reg {
        Reg::from_signature_and_id(signature, self.0.id)
    }

    /// Reset to an invalid register.
    pub fn reset(&mut self) {
        self.0.reset();
    }

    // ── Accessors ───────────────────────────────────────────────────────

    /// Whether the register is valid (signature is nonzero).
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0.signature != 0
    }

    /// Whether this is a physical register.
    #[must_use]
    pub const fn is_phys_reg(&self) -> bool {
        self.0.id < Reg::ID_BAD
    }

    /// Whether this is a virtual register handle.
    #[must_use]
    pub const fn is_virt_reg(&self) -> bool {
        self.0.id > Reg::ID_BAD
    }

    /// Whether this register denotes the same register as `other`.
    ///
    /// Compares only the first 8 bytes (signature and id). Valid because
    /// registers never use the upper 8 bytes; for general operands use
    /// full equality instead.
    #[must_use]
    pub const fn is_same(&self, other: &Reg) -> bool {
        self.0.signature == other.0.signature && self.0.id == other.0.id
    }

    /// Whether the register type matches `ty`.
    #[must_use]
    pub const fn is_type(&self, ty: RegType) -> bool {
        (self.0.signature & sig::REG_TYPE_MASK) == (ty.bits() << sig::REG_TYPE_SHIFT)
    }

    /// Whether the register group matches `group`.
    #[must_use]
    pub const fn is_group(&self, group: RegGroup) -> bool {
        (self.0.signature & sig::REG_GROUP_MASK) == (group.bits() << sig::REG_GROUP_SHIFT)
    }

    /// Whether this is a general purpose register of any size.
    #[must_use]
    pub const fn is_gp(&self) -> bool {
        Reg::is_gp_operand(&self.0)
    }

    /// Whether this is a vector register of any size.
    #[must_use]
    pub const fn is_vec(&self) -> bool {
        Reg::is_vec_operand(&self.0)
    }

    /// The register type.
    #[must_use]
    pub const fn reg_type(&self) -> RegType {
        RegType::from_bits(self.0.signature_data(sig::REG_TYPE_BITS, sig::REG_TYPE_SHIFT))
    }

    /// The register group.
    #[must_use]
    pub const fn group(&self) -> RegGroup {
        RegGroup::from_bits(self.0.signature_data(sig::REG_GROUP_BITS, sig::REG_GROUP_SHIFT))
    }

    /// Register size in bytes.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.0.size()
    }

    /// Physical or virtual register id.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.0.id
    }

    /// Full operand signature.
    #[must_use]
    pub const fn signature(&self) -> u32 {
        self.0.signature
    }

    /// Set the register id.
    pub fn set_id(&mut self, id: u32) {
        self.0.id = id;
    }

    /// Set both signature and id.
    pub fn set_signature_and_id(&mut self, signature: u32, id: u32) {
        self.0.signature = signature;
        self.0.id = id;
    }

    /// This register as a generic operand reference.
    #[must_use]
    pub const fn as_operand(&self) -> &Operand {
        &self.0
    }

    // ── Group tests over generic operands ───────────────────────────────

    /// Whether `op` is a general purpose register of any type and size.
    ///
    /// A single masked compare of the operand-type and group bits against a
    /// precomputed template, so two different widths in the group compare
    /// the same way without enumerating widths.
    #[must_use]
    pub const fn is_gp_operand(op: &Operand) -> bool {
        const TEMPLATE: u32 = (OpType::Reg as u32) << sig::OP_TYPE_SHIFT
            | RegGroup::GP.bits() << sig::REG_GROUP_SHIFT;
        (op.signature & (sig::OP_TYPE_MASK | sig::REG_GROUP_MASK)) == TEMPLATE
    }

    /// Whether `op` is a vector register of any type and size.
    #[must_use]
    pub const fn is_vec_operand(op: &Operand) -> bool {
        const TEMPLATE: u32 = (OpType::Reg as u32) << sig::OP_TYPE_SHIFT
            | RegGroup::VEC.bits() << sig::REG_GROUP_SHIFT;
        (op.signature & (sig::OP_TYPE_MASK | sig::REG_GROUP_MASK)) == TEMPLATE
    }

    /// Whether `op` is a general purpose register with id `id`.
    #[must_use]
    pub const fn is_gp_operand_id(op: &Operand, id: u32) -> bool {
        Reg::is_gp_operand(op) && op.id == id
    }

    /// Whether `op` is a vector register with id `id`.
    #[must_use]
    pub const fn is_vec_operand_id(op: &Operand, id: u32) -> bool {
        Reg::is_vec_operand(op) && op.id == id
    }
}

impl Default for Reg {
    fn default() -> Reg {
        Reg::new()
    }
}

// ─── RegOnly ─────────────────────────────────────────────────────────────────

/// 8-byte register reference holding only a signature and an id.
///
/// Used where storing a full 16-byte [`Operand`] per extra register would
/// waste space, for example instruction side-tables that record one extra
/// register per entry. Bit-compatible with the first 8 bytes of `Operand`,
/// and round-trips to a full [`Reg`] losslessly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct RegOnly {
    signature: u32,
    id: u32,
}

const _: () = assert!(core::mem::size_of::<RegOnly>() == 8);

impl RegOnly {
    /// An empty (none) register reference.
    pub const NONE: RegOnly = RegOnly {
        signature: 0,
        id: 0,
    };

    /// Create a reference from a signature and an id.
    #[must_use]
    pub const fn from_signature_and_id(signature: u32, id: u32) -> RegOnly {
        RegOnly { signature, id }
    }

    /// Create a reference from a full register.
    #[must_use]
    pub const fn from_reg(reg: &Reg) -> RegOnly {
        RegOnly::from_signature_and_id(reg.signature(), reg.id())
    }

    /// Initialize to hold `signature` and `id`.
    pub fn init(&mut self, signature: u32, id: u32) {
        self.signature = signature;
        self.id = id;
    }

    /// Reset to none.
    pub fn reset(&mut self) {
        self.init(0, 0);
    }

    /// Whether the reference is none.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        self.signature == 0
    }

    /// Whether the reference holds a valid register.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.signature != 0
    }

    /// Whether this is a physical register.
    #[must_use]
    pub const fn is_phys_reg(&self) -> bool {
        self.id < Reg::ID_BAD
    }

    /// Whether this is a virtual register handle.
    #[must_use]
    pub const fn is_virt_reg(&self) -> bool {
        self.id > Reg::ID_BAD
    }

    /// The register signature, or zero.
    #[must_use]
    pub const fn signature(&self) -> u32 {
        self.signature
    }

    /// The register id, or zero.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.id
    }

    /// Set the register id.
    pub fn set_id(&mut self, id: u32) {
        self.id = id;
    }

    /// The register type.
    #[must_use]
    pub const fn reg_type(&self) -> RegType {
        RegType::from_bits((self.signature >> sig::REG_TYPE_SHIFT) & sig::REG_TYPE_BITS)
    }

    /// The register group.
    #[must_use]
    pub const fn group(&self) -> RegGroup {
        RegGroup::from_bits((self.signature >> sig::REG_GROUP_SHIFT) & sig::REG_GROUP_BITS)
    }

    /// Reconstruct the full register operand.
    #[must_use]
    pub const fn to_reg(self) -> Reg {
        Reg::from_signature_and_id(self.signature, self.id)
    }
}

impl From<Reg> for RegOnly {
    fn from(reg: Reg) -> RegOnly {
        RegOnly::from_reg(&reg)
    }
}

// ─── Mem ─────────────────────────────────────────────────────────────────────

/// Addressing mode of a memory operand (2-bit signature field).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum AddrType {
    /// Architecture decides, usually relative when reachable.
    #[default]
    Default = 0,
    /// Absolute address.
    Abs = 1,
    /// Relative address.
    Rel = 2,
    /// Address with respect to a section or symbol base.
    Wrt = 3,
}

impl AddrType {
    /// Decode a 2-bit address type field.
    #[must_use]
    pub const fn from_bits(bits: u32) -> AddrType {
        match bits & sig::MEM_ADDR_TYPE_BITS {
            1 => AddrType::Abs,
            2 => AddrType::Rel,
            3 => AddrType::Wrt,
            _ => AddrType::Default,
        }
    }
}

impl fmt::Display for AddrType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AddrType::Default => write!(f, "default"),
            AddrType::Abs => write!(f, "abs"),
            AddrType::Rel => write!(f, "rel"),
            AddrType::Wrt => write!(f, "wrt"),
        }
    }
}

/// Memory operand.
///
/// Packing every addressable form into 16 bytes splits the words like so:
///
/// * **BASE** is a register or a label. The base type lives in the
///   signature (a register type code, or [`Label::TAG`] for labels, or
///   zero for no base) and the base id occupies the operand's id word.
/// * **INDEX** follows the same scheme in its own signature window, with
///   its id in the third word.
/// * **OFFSET** low 32 bits live in the fourth word. When no base is
///   present the id word is free, and the offset becomes a full 64-bit
///   absolute address or displacement with its high half stored there.
///
/// The capacity trade-off is hard: with a base present only the low 32
/// bits of offset exist, and [`Mem::set_offset`] truncates silently in
/// that mode. Switching between the two modes goes through
/// [`Mem::set_base`] / [`Mem::reset_base`], which rewrite the id word, so
/// stale high/low offset bits never leak across a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Mem(Operand);

impl Mem {
    /// Create a memory operand pointing to absolute address zero, with no
    /// base or index.
    #[must_use]
    pub const fn new() -> Mem {
        Mem(Operand::from_words(OpType::Mem as u32, 0, 0, 0))
    }

    /// Create a memory operand from raw parts.
    ///
    /// `base_ty` is a register type, [`Label::TAG`], or zero; `flags` is
    /// any pre-shifted combination of address-type and reg-home bits.
    #[must_use]
    pub const fn from_parts(
        base_ty: u32,
        base_id: u32,
        index_ty: u32,
        index_id: u32,
        offset_lo: i32,
        size: u32,
        flags: u32,
    ) -> Mem {
        Mem(Operand::from_words(
            (OpType::Mem as u32)
                | (base_ty << sig::MEM_BASE_TYPE_SHIFT)
                | (index_ty << sig::MEM_INDEX_TYPE_SHIFT)
                | (size << sig::SIZE_SHIFT)
                | flags,
            base_id,
            index_id,
            offset_lo as u32,
        ))
    }

    /// Create a memory operand for a 64-bit absolute address.
    #[must_use]
    pub const fn abs(address: u64) -> Mem {
        Mem(Operand::from_words(
            (OpType::Mem as u32) | ((AddrType::Abs as u32) << sig::MEM_ADDR_TYPE_SHIFT),
            (address >> 32) as u32,
            0,
            address as u32,
        ))
    }

    /// Create a `[base + offset]` memory operand.
    #[must_use]
    pub const fn base_offset(base: &Reg, offset: i32) -> Mem {
        Mem(Operand::from_words(
            (OpType::Mem as u32) | (base.reg_type().bits() << sig::MEM_BASE_TYPE_SHIFT),
            base.id(),
            0,
            offset as u32,
        ))
    }

    /// Create a `[label + offset]` memory operand.
    #[must_use]
    pub const fn label_offset(label: &Label, offset: i32) -> Mem {
        Mem(Operand::from_words(
            (OpType::Mem as u32) | (Label::TAG << sig::MEM_BASE_TYPE_SHIFT),
            label.id(),
            0,
            offset as u32,
        ))
    }

    /// Reset so the operand points to absolute address zero again.
    pub fn reset(&mut self) {
        self.0 = Operand::from_words(OpType::Mem as u32, 0, 0, 0);
    }

    // ── Address type and flags ──────────────────────────────────────────

    /// Whether an explicit address type is set.
    #[must_use]
    pub const fn has_addr_type(&self) -> bool {
        self.0.has_signature_data(sig::MEM_ADDR_TYPE_MASK)
    }

    /// The address type.
    #[must_use]
    pub const fn addr_type(&self) -> AddrType {
        AddrType::from_bits(
            self.0
                .signature_data(sig::MEM_ADDR_TYPE_BITS, sig::MEM_ADDR_TYPE_SHIFT),
        )
    }

    /// Set the address type.
    pub fn set_addr_type(&mut self, addr_type: AddrType) {
        self.0.set_signature_data(
            addr_type as u32,
            sig::MEM_ADDR_TYPE_BITS,
            sig::MEM_ADDR_TYPE_SHIFT,
        );
    }

    /// Clear the address type back to default.
    pub fn reset_addr_type(&mut self) {
        self.0
            .clear_signature_data(sig::MEM_ADDR_TYPE_BITS, sig::MEM_ADDR_TYPE_SHIFT);
    }

    /// Whether the address type is absolute.
    #[must_use]
    pub const fn is_abs(&self) -> bool {
        matches!(self.addr_type(), AddrType::Abs)
    }

    /// Mark the address as absolute.
    pub fn set_abs(&mut self) {
        self.set_addr_type(AddrType::Abs);
    }

    /// Whether the address type is relative.
    #[must_use]
    pub const fn is_rel(&self) -> bool {
        matches!(self.addr_type(), AddrType::Rel)
    }

    /// Mark the address as relative.
    pub fn set_rel(&mut self) {
        self.set_addr_type(AddrType::Rel);
    }

    /// Whether the address is taken with respect to a section/symbol base.
    #[must_use]
    pub const fn is_wrt(&self) -> bool {
        matches!(self.addr_type(), AddrType::Wrt)
    }

    /// Mark the address as section/symbol relative.
    pub fn set_wrt(&mut self) {
        self.set_addr_type(AddrType::Wrt);
    }

    /// Whether this operand is a register home slot (spill location of a
    /// virtual register rather than a real memory reference).
    #[must_use]
    pub const fn is_reg_home(&self) -> bool {
        self.0.has_signature_data(sig::MEM_REG_HOME_FLAG)
    }

    /// Mark this operand as a register home slot.
    pub fn set_reg_home(&mut self) {
        self.0.add_signature_data(sig::MEM_REG_HOME_FLAG);
    }

    /// Clear the register home marker.
    pub fn clear_reg_home(&mut self) {
        self.0
            .clear_signature_data(sig::MEM_REG_HOME_BITS, sig::MEM_REG_HOME_SHIFT);
    }

    // ── Base and index ──────────────────────────────────────────────────

    /// Whether a base register or base label is present.
    #[must_use]
    pub const fn has_base(&self) -> bool {
        (self.0.signature & sig::MEM_BASE_TYPE_MASK) != 0
    }

    /// Whether an index register is present.
    #[must_use]
    pub const fn has_index(&self) -> bool {
        (self.0.signature & sig::MEM_INDEX_TYPE_MASK) != 0
    }

    /// Whether a base or an index is present, one combined mask read.
    #[must_use]
    pub const fn has_base_or_index(&self) -> bool {
        (self.0.signature & sig::MEM_BASE_INDEX_MASK) != 0
    }

    /// Whether both a base and an index are present.
    #[must_use]
    pub const fn has_base_and_index(&self) -> bool {
        (self.0.signature & sig::MEM_BASE_TYPE_MASK) != 0
            && (self.0.signature & sig::MEM_INDEX_TYPE_MASK) != 0
    }

    /// Whether the base is a register (register types start after
    /// [`Label::TAG`]).
    #[must_use]
    pub const fn has_base_reg(&self) -> bool {
        (self.0.signature & sig::MEM_BASE_TYPE_MASK) > (Label::TAG << sig::MEM_BASE_TYPE_SHIFT)
    }

    /// Whether the base is a label.
    ///
    /// True exactly when the base type field holds [`Label::TAG`], a value
    /// never used by any register type. The id word then carries a label
    /// id instead of a register id; no separate discriminant exists.
    #[must_use]
    pub const fn has_base_label(&self) -> bool {
        (self.0.signature & sig::MEM_BASE_TYPE_MASK) == (Label::TAG << sig::MEM_BASE_TYPE_SHIFT)
    }

    /// Whether the index is a register.
    #[must_use]
    pub const fn has_index_reg(&self) -> bool {
        (self.0.signature & sig::MEM_INDEX_TYPE_MASK) > (Label::TAG << sig::MEM_INDEX_TYPE_SHIFT)
    }

    /// Base type field: a register type code, [`Label::TAG`], or zero when
    /// no base is present. Check [`Mem::has_base_label`] before treating
    /// [`Mem::base_id`] as a register id.
    #[must_use]
    pub const fn base_type(&self) -> u32 {
        self.0
            .signature_data(sig::MEM_BASE_TYPE_BITS, sig::MEM_BASE_TYPE_SHIFT)
    }

    /// Index type field: a register type code or zero.
    #[must_use]
    pub const fn index_type(&self) -> u32 {
        self.0
            .signature_data(sig::MEM_INDEX_TYPE_BITS, sig::MEM_INDEX_TYPE_SHIFT)
    }

    /// Base and index type fields combined into one 10-bit value.
    #[must_use]
    pub const fn base_and_index_types(&self) -> u32 {
        self.0
            .signature_data(sig::MEM_BASE_INDEX_BITS, sig::MEM_BASE_INDEX_SHIFT)
    }

    /// Id of the base register, or label id if the base is a label.
    #[must_use]
    pub const fn base_id(&self) -> u32 {
        self.0.id
    }

    /// Id of the index register.
    #[must_use]
    pub const fn index_id(&self) -> u32 {
        self.0.data[0]
    }

    /// Set the base id without modifying its type.
    pub fn set_base_id(&mut self, id: u32) {
        self.0.id = id;
    }

    /// Set the index id without modifying its type.
    pub fn set_index_id(&mut self, id: u32) {
        self.0.data[0] = id;
    }

    /// Set the base register. Leaves the index untouched; base and index
    /// occupy disjoint signature windows and separate id words.
    pub fn set_base(&mut self, base: &Reg) {
        self.set_base_raw(base.reg_type().bits(), base.id());
    }

    /// Set the base to a label.
    pub fn set_base_label(&mut self, label: &Label) {
        self.set_base_raw(Label::TAG, label.id());
    }

    /// Set the index register. Leaves the base untouched.
    pub fn set_index(&mut self, index: &Reg) {
        self.set_index_raw(index.reg_type().bits(), index.id());
    }

    /// Set the base from a raw type code and id.
    pub fn set_base_raw(&mut self, ty: u32, id: u32) {
        self.0
            .set_signature_data(ty, sig::MEM_BASE_TYPE_BITS, sig::MEM_BASE_TYPE_SHIFT);
        self.0.id = id;
    }

    /// Set the index from a raw type code and id.
    pub fn set_index_raw(&mut self, ty: u32, id: u32) {
        self.0
            .set_signature_data(ty, sig::MEM_INDEX_TYPE_BITS, sig::MEM_INDEX_TYPE_SHIFT);
        self.0.data[0] = id;
    }

    /// Remove the base register or label.
    ///
    /// Also zeroes the id word, so the operand re-enters 64-bit offset
    /// mode with a clean high half rather than stale base-id bits.
    pub fn reset_base(&mut self) {
        self.set_base_raw(0, 0);
    }

    /// Remove the index register.
    pub fn reset_index(&mut self) {
        self.set_index_raw(0, 0);
    }

    /// Set the operand size in bytes (optional for memory operands).
    pub fn set_size(&mut self, size: u32) {
        self.0
            .set_signature_data(size, sig::SIZE_BITS, sig::SIZE_SHIFT);
    }

    // ── Offset ──────────────────────────────────────────────────────────

    /// Whether the offset is a full 64-bit value.
    ///
    /// True exactly when no base register or label is present; the id word
    /// is then free to hold the high offset half. When this returns true,
    /// [`Mem::has_base`] is always false.
    #[must_use]
    pub const fn is_offset_64bit(&self) -> bool {
        self.base_type() == 0
    }

    /// Whether the offset or absolute address is nonzero.
    #[must_use]
    pub const fn has_offset(&self) -> bool {
        let hi_mask = (self.is_offset_64bit() as u32).wrapping_neg();
        (self.0.data[1] | (self.0.id & hi_mask)) != 0
    }

    /// The 64-bit offset or absolute address.
    ///
    /// Assembled from both halves in 64-bit mode, otherwise the 32-bit
    /// offset word sign-extended.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        if self.is_offset_64bit() {
            (self.0.data[1] as u64 | (self.0.id as u64) << 32) as i64
        } else {
            self.0.data[1] as i32 as i64
        }
    }

    /// The low 32 bits of the offset.
    #[must_use]
    pub const fn offset_lo32(&self) -> i32 {
        self.0.data[1] as i32
    }

    /// The high 32 bits of a 64-bit offset.
    ///
    /// Meaningless when [`Mem::is_offset_64bit`] is false; the word then
    /// holds the base id. Always check the mode first.
    #[must_use]
    pub const fn offset_hi32(&self) -> i32 {
        self.0.id as i32
    }

    /// Set the offset or absolute address.
    ///
    /// Writes both halves in 64-bit mode. With a base present only the low
    /// 32 bits are stored; the high half is discarded and the base id is
    /// never overwritten. The mode check is folded into a mask so the
    /// write is branch-free.
    pub fn set_offset(&mut self, offset: i64) {
        let lo = offset as u32;
        let hi = (offset as u64 >> 32) as u32;
        let hi_mask = (self.is_offset_64bit() as u32).wrapping_neg();

        self.0.data[1] = lo;
        self.0.id = (hi & hi_mask) | (self.0.id & !hi_mask);
    }

    /// Set only the low 32 bits of the offset.
    pub fn set_offset_lo32(&mut self, offset: i32) {
        self.0.data[1] = offset as u32;
    }

    /// Adjust the offset by `offset`, with carry into the high half in
    /// 64-bit mode.
    pub fn add_offset(&mut self, offset: i64) {
        if self.is_offset_64bit() {
            let current = self.0.data[1] as u64 | (self.0.id as u64) << 32;
            let result = (offset as u64).wrapping_add(current);
            self.0.data[1] = result as u32;
            self.0.id = (result >> 32) as u32;
        } else {
            self.0.data[1] = self.0.data[1].wrapping_add(offset as u32);
        }
    }

    /// Adjust only the low 32 bits of the offset.
    pub fn add_offset_lo32(&mut self, offset: i32) {
        self.0.data[1] = self.0.data[1].wrapping_add(offset as u32);
    }

    /// Reset the offset to zero.
    pub fn reset_offset(&mut self) {
        self.set_offset(0);
    }

    /// Reset only the low 32 bits of the offset.
    pub fn reset_offset_lo32(&mut self) {
        self.set_offset_lo32(0);
    }

    /// This memory operand as a generic operand reference.
    #[must_use]
    pub const fn as_operand(&self) -> &Operand {
        &self.0
    }
}

impl Default for Mem {
    fn default() -> Mem {
        Mem::new()
    }
}

// ─── Imm ─────────────────────────────────────────────────────────────────────

/// Immediate operand.
///
/// Carries one 64-bit slot reinterpretable as a signed or unsigned integer
/// or floating point value. Narrowing accessors read the low sub-word;
/// the extension helpers are explicit, mutating operations so an encoder
/// always knows precisely which bits are defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Imm(Operand);

impl Imm {
    /// Create a zero immediate.
    #[must_use]
    pub const fn new() -> Imm {
        Imm(Operand::from_words(OpType::Imm as u32, 0, 0, 0))
    }

    /// Create a signed immediate.
    #[must_use]
    pub const fn from_i64(value: i64) -> Imm {
        Imm(Operand::from_words(
            OpType::Imm as u32,
            0,
            value as u32,
            (value as u64 >> 32) as u32,
        ))
    }

    /// Create an unsigned immediate.
    #[must_use]
    pub const fn from_u64(value: u64) -> Imm {
        Imm::from_i64(value as i64)
    }

    /// Reset to a zero immediate.
    pub fn reset(&mut self) {
        self.0 = Operand::from_words(OpType::Imm as u32, 0, 0, 0);
    }

    // ── Width-fit predicates ────────────────────────────────────────────

    /// Whether the value fits losslessly in a signed 8-bit integer.
    #[must_use]
    pub fn is_int8(&self) -> bool {
        i8::try_from(self.int64()).is_ok()
    }

    /// Whether the value fits losslessly in an unsigned 8-bit integer.
    #[must_use]
    pub fn is_uint8(&self) -> bool {
        u8::try_from(self.int64()).is_ok()
    }

    /// Whether the value fits losslessly in a signed 16-bit integer.
    #[must_use]
    pub fn is_int16(&self) -> bool {
        i16::try_from(self.int64()).is_ok()
    }

    /// Whether the value fits losslessly in an unsigned 16-bit integer.
    #[must_use]
    pub fn is_uint16(&self) -> bool {
        u16::try_from(self.int64()).is_ok()
    }

    /// Whether the value fits losslessly in a signed 32-bit integer.
    #[must_use]
    pub fn is_int32(&self) -> bool {
        i32::try_from(self.int64()).is_ok()
    }

    /// Whether the value fits losslessly in an unsigned 32-bit integer.
    #[must_use]
    pub fn is_uint32(&self) -> bool {
        u32::try_from(self.int64()).is_ok()
    }

    // ── Typed views ─────────────────────────────────────────────────────

    /// Low byte as a signed 8-bit integer.
    #[must_use]
    pub const fn int8(&self) -> i8 {
        self.0.data[0] as i8
    }

    /// Low byte as an unsigned 8-bit integer.
    #[must_use]
    pub const fn uint8(&self) -> u8 {
        self.0.data[0] as u8
    }

    /// Low 16 bits as a signed integer.
    #[must_use]
    pub const fn int16(&self) -> i16 {
        self.0.data[0] as i16
    }

    /// Low 16 bits as an unsigned integer.
    #[must_use]
    pub const fn uint16(&self) -> u16 {
        self.0.data[0] as u16
    }

    /// Low 32 bits as a signed integer.
    #[must_use]
    pub const fn int32(&self) -> i32 {
        self.0.data[0] as i32
    }

    /// High 32 bits as a signed integer.
    #[must_use]
    pub const fn int32_hi(&self) -> i32 {
        self.0.data[1] as i32
    }

    /// Low 32 bits as an unsigned integer.
    #[must_use]
    pub const fn uint32(&self) -> u32 {
        self.0.data[0]
    }

    /// High 32 bits as an unsigned integer.
    #[must_use]
    pub const fn uint32_hi(&self) -> u32 {
        self.0.data[1]
    }

    /// The value as a signed 64-bit integer.
    #[must_use]
    pub const fn int64(&self) -> i64 {
        self.uint64() as i64
    }

    /// The value as an unsigned 64-bit integer.
    #[must_use]
    pub const fn uint64(&self) -> u64 {
        self.0.data[0] as u64 | (self.0.data[1] as u64) << 32
    }

    /// Low 32 bits as a float.
    #[must_use]
    pub const fn f32(&self) -> f32 {
        f32::from_bits(self.0.data[0])
    }

    /// The value as a double.
    #[must_use]
    pub const fn f64(&self) -> f64 {
        f64::from_bits(self.uint64())
    }

    // ── Setters (extend into the full slot) ─────────────────────────────

    /// Set a signed 8-bit value, sign-extended into the full slot.
    pub fn set_int8(&mut self, value: i8) {
        self.set_int64(value as i64);
    }

    /// Set an unsigned 8-bit value, zero-extended into the full slot.
    pub fn set_uint8(&mut self, value: u8) {
        self.set_uint64(value as u64);
    }

    /// Set a signed 16-bit value, sign-extended into the full slot.
    pub fn set_int16(&mut self, value: i16) {
        self.set_int64(value as i64);
    }

    /// Set an unsigned 16-bit value, zero-extended into the full slot.
    pub fn set_uint16(&mut self, value: u16) {
        self.set_uint64(value as u64);
    }

    /// Set a signed 32-bit value, sign-extended into the full slot.
    pub fn set_int32(&mut self, value: i32) {
        self.set_int64(value as i64);
    }

    /// Set an unsigned 32-bit value, zero-extended into the full slot.
    pub fn set_uint32(&mut self, value: u32) {
        self.set_uint64(value as u64);
    }

    /// Set the full 64-bit signed value.
    pub fn set_int64(&mut self, value: i64) {
        self.set_uint64(value as u64);
    }

    /// Set the full 64-bit unsigned value.
    pub fn set_uint64(&mut self, value: u64) {
        self.0.data[0] = value as u32;
        self.0.data[1] = (value >> 32) as u32;
    }

    /// Set a 32-bit float. The high word is cleared so the slot never
    /// carries encoder-visible garbage next to a 32-bit payload.
    pub fn set_f32(&mut self, value: f32) {
        self.0.data[0] = value.to_bits();
        self.0.data[1] = 0;
    }

    /// Set a 64-bit float.
    pub fn set_f64(&mut self, value: f64) {
        self.set_uint64(value.to_bits());
    }

    // ── Explicit extension ──────────────────────────────────────────────

    /// Sign-extend the low 8 bits into the full slot.
    pub fn sign_extend_8bits(&mut self) {
        self.set_int64(self.uint64() as u8 as i8 as i64);
    }

    /// Sign-extend the low 16 bits into the full slot.
    pub fn sign_extend_16bits(&mut self) {
        self.set_int64(self.uint64() as u16 as i16 as i64);
    }

    /// Sign-extend the low 32 bits into the full slot.
    pub fn sign_extend_32bits(&mut self) {
        self.set_int64(self.uint64() as u32 as i32 as i64);
    }

    /// Zero-extend the low 8 bits into the full slot.
    pub fn zero_extend_8bits(&mut self) {
        self.set_uint64(self.uint64() & 0xFF);
    }

    /// Zero-extend the low 16 bits into the full slot.
    pub fn zero_extend_16bits(&mut self) {
        self.set_uint64(self.uint64() & 0xFFFF);
    }

    /// Zero-extend the low 32 bits into the full slot.
    pub fn zero_extend_32bits(&mut self) {
        self.set_uint64(self.uint64() & 0xFFFF_FFFF);
    }

    /// This immediate as a generic operand reference.
    #[must_use]
    pub const fn as_operand(&self) -> &Operand {
        &self.0
    }
}

impl Default for Imm {
    fn default() -> Imm {
        Imm::new()
    }
}

impl From<i64> for Imm {
    fn from(value: i64) -> Imm {
        Imm::from_i64(value)
    }
}

impl From<u64> for Imm {
    fn from(value: u64) -> Imm {
        Imm::from_u64(value)
    }
}

// ─── Label ───────────────────────────────────────────────────────────────────

/// Label classification recorded by the emitter that allocates label ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum LabelType {
    /// Anonymous (unnamed) label.
    #[default]
    Anonymous = 0,
    /// Local label, scoped to a parent.
    Local = 1,
    /// Global label.
    Global = 2,
}

/// Label operand: a jump target or data reference.
///
/// Label ids are minted by an external emitter and are opaque here; id
/// zero means the label was never registered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Label(Operand);

impl Label {
    /// Base type tag marking a label used in a memory operand's base
    /// field. The value 1 is never associated with any register type, so
    /// a base field can be built from either a register or a label with
    /// the same bit machinery and no extra discriminant.
    pub const TAG: u32 = 1;

    /// Create an unbound label (id zero, invalid until an id is set).
    #[must_use]
    pub const fn new() -> Label {
        Label(Operand::from_words(OpType::Label as u32, 0, 0, 0))
    }

    /// Create a label with the given id.
    #[must_use]
    pub const fn from_id(id: u32) -> Label {
        Label(Operand::from_words(OpType::Label as u32, id, 0, 0))
    }

    /// Reset to an unbound label.
    pub fn reset(&mut self) {
        self.0 = Operand::from_words(OpType::Label as u32, 0, 0, 0);
    }

    /// Whether the label has an assigned id.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        self.0.id != 0
    }

    /// The label id, zero if unbound.
    #[must_use]
    pub const fn id(&self) -> u32 {
        self.0.id
    }

    /// Set the label id.
    pub fn set_id(&mut self, id: u32) {
        self.0.id = id;
    }

    /// This label as a generic operand reference.
    #[must_use]
    pub const fn as_operand(&self) -> &Operand {
        &self.0
    }
}

impl Default for Label {
    fn default() -> Label {
        Label::new()
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn none_is_all_zero() {
        let op = Operand::new();
        assert_eq!(op, Operand::NONE);
        assert_eq!(op, Operand::default());
        assert!(op.is_none());
        assert_eq!(op.words(), [0, 0, 0, 0]);
        assert_eq!(op.size(), 0);
        assert_eq!(op.id(), 0);
    }

    #[test]
    fn reset_restores_none() {
        let mut op = Operand::from(Reg::from_type_and_id(RegType::GP64, 3));
        assert!(!op.is_none());
        op.reset();
        assert_eq!(op, Operand::NONE);
    }

    #[test]
    fn signature_data_round_trip() {
        let mut op = Operand::new();
        op.set_signature_data(0x15, sig::REG_TYPE_BITS, sig::REG_TYPE_SHIFT);
        op.set_signature_data(0x9, sig::REG_GROUP_BITS, sig::REG_GROUP_SHIFT);
        op.set_signature_data(0xAB, sig::SIZE_BITS, sig::SIZE_SHIFT);

        assert_eq!(
            op.signature_data(sig::REG_TYPE_BITS, sig::REG_TYPE_SHIFT),
            0x15
        );
        assert_eq!(
            op.signature_data(sig::REG_GROUP_BITS, sig::REG_GROUP_SHIFT),
            0x9
        );
        assert_eq!(op.signature_data(sig::SIZE_BITS, sig::SIZE_SHIFT), 0xAB);

        // Overwriting one field leaves the others intact.
        op.set_signature_data(0x01, sig::REG_GROUP_BITS, sig::REG_GROUP_SHIFT);
        assert_eq!(
            op.signature_data(sig::REG_TYPE_BITS, sig::REG_TYPE_SHIFT),
            0x15
        );
        assert_eq!(op.signature_data(sig::SIZE_BITS, sig::SIZE_SHIFT), 0xAB);
    }

    #[test]
    #[should_panic(expected = "signature field value does not fit")]
    #[cfg(debug_assertions)]
    fn signature_data_overflow_asserts() {
        let mut op = Operand::new();
        op.set_signature_data(0x10, sig::REG_GROUP_BITS, sig::REG_GROUP_SHIFT);
    }

    #[test]
    fn op_type_decoding() {
        assert_eq!(OpType::from_bits(0), OpType::None);
        assert_eq!(OpType::from_bits(1), OpType::Reg);
        assert_eq!(OpType::from_bits(2), OpType::Mem);
        assert_eq!(OpType::from_bits(3), OpType::Imm);
        assert_eq!(OpType::from_bits(4), OpType::Label);
        // Unused codes decode to none.
        assert_eq!(OpType::from_bits(5), OpType::None);
        assert_eq!(OpType::from_bits(7), OpType::None);
    }

    #[test]
    fn phys_virt_partition() {
        let phys = Reg::from_type_and_id(RegType::GP32, 0);
        assert!(phys.is_phys_reg());
        assert!(!phys.is_virt_reg());

        let bad = Reg::from_type_and_id(RegType::GP32, Reg::ID_BAD);
        assert!(!bad.is_phys_reg());
        assert!(!bad.is_virt_reg());

        let virt = Reg::from_type_and_id(RegType::GP32, Operand::pack_id(0));
        assert!(!virt.is_phys_reg());
        assert!(virt.is_virt_reg());
    }

    #[test]
    fn packed_id_namespace() {
        assert!(!Operand::is_packed_id(0));
        assert!(!Operand::is_packed_id(0xFF));
        assert!(Operand::is_packed_id(0x100));
        assert!(Operand::is_packed_id(u32::MAX));
        assert_eq!(Operand::unpack_id(Operand::pack_id(42)), 42);
    }

    #[test]
    fn reg_group_templates() {
        let gpd = Reg::from_type_and_id(RegType::GP32, 5);
        let gpq = Reg::from_type_and_id(RegType::GP64, 5);
        let xmm = Reg::from_type_and_id(RegType::VEC128, 5);

        // Same group regardless of width.
        assert!(gpd.is_gp());
        assert!(gpq.is_gp());
        assert!(!xmm.is_gp());
        assert!(xmm.is_vec());
        assert!(!gpq.is_vec());

        let op = Operand::from(gpq);
        assert!(Reg::is_gp_operand(&op));
        assert!(Reg::is_gp_operand_id(&op, 5));
        assert!(!Reg::is_gp_operand_id(&op, 6));
    }

    #[test]
    fn reg_clone_as_preserves_id() {
        let gpd = Reg::from_type_and_id(RegType::GP32, 11);
        let gpq = gpd.clone_as(RegType::GP64);
        assert_eq!(gpq.id(), 11);
        assert_eq!(gpq.reg_type(), RegType::GP64);
        assert_eq!(gpq.size(), 8);
        assert!(gpq.is_gp());
    }

    #[test]
    fn reg_is_same_vs_equal() {
        let a = Reg::from_type_and_id(RegType::GP64, 2);
        let b = Reg::from_type_and_id(RegType::GP64, 2);
        let c = Reg::from_type_and_id(RegType::GP64, 3);
        assert!(a.is_same(&b));
        assert_eq!(a, b);
        assert!(!a.is_same(&c));
        assert_ne!(a, c);
    }

    #[test]
    fn reg_only_round_trip() {
        let reg = Reg::from_type_and_id(RegType::VEC256, 9);
        let slim = RegOnly::from_reg(&reg);
        assert_eq!(slim.signature(), reg.signature());
        assert_eq!(slim.id(), 9);
        assert_eq!(slim.reg_type(), RegType::VEC256);
        assert_eq!(slim.group(), RegGroup::VEC);
        assert_eq!(slim.to_reg(), reg);

        let mut none = RegOnly::NONE;
        assert!(none.is_none());
        none.init(reg.signature(), reg.id());
        assert!(none.is_valid());
        none.reset();
        assert!(none.is_none());
    }

    #[test]
    fn mem_base_index_independence() {
        let base = Reg::from_type_and_id(RegType::GP64, 4);
        let index = Reg::from_type_and_id(RegType::GP64, 12);

        let mut mem = Mem::new();
        mem.set_index(&index);
        mem.set_base(&base);
        assert_eq!(mem.index_type(), RegType::GP64.bits());
        assert_eq!(mem.index_id(), 12);
        assert_eq!(mem.base_id(), 4);

        mem.reset_base();
        assert!(!mem.has_base());
        assert!(mem.has_index());
        assert_eq!(mem.index_id(), 12);
    }

    #[test]
    fn mem_offset_64bit_mode() {
        let mut mem = Mem::new();
        assert!(mem.is_offset_64bit());
        assert!(!mem.has_offset());

        mem.set_offset(0x1_0000_0008);
        assert_eq!(mem.offset(), 0x1_0000_0008);
        assert!(mem.has_offset());

        mem.set_offset(-1);
        assert_eq!(mem.offset(), -1);

        mem.add_offset(-7);
        assert_eq!(mem.offset(), -8);
    }

    #[test]
    fn mem_offset_32bit_mode_preserves_base() {
        let base = Reg::from_type_and_id(RegType::GP64, 7);
        let mut mem = Mem::new();
        mem.set_base(&base);
        assert!(!mem.is_offset_64bit());

        mem.set_offset(-8);
        assert_eq!(mem.offset(), -8);
        assert_eq!(mem.base_id(), 7);

        // The high half is silently dropped with a base present.
        mem.set_offset(0x7_0000_0010);
        assert_eq!(mem.offset(), 0x10);
        assert_eq!(mem.base_id(), 7);
    }

    #[test]
    fn mem_mode_transition_has_no_stale_bits() {
        let base = Reg::from_type_and_id(RegType::GP64, 0xAB);
        let mut mem = Mem::new();
        mem.set_base(&base);
        mem.set_offset(4);

        // Dropping the base zeroes the id word, so the 64-bit view starts
        // clean instead of reading the old base id as offset-hi.
        mem.reset_base();
        assert!(mem.is_offset_64bit());
        assert_eq!(mem.offset(), 4);
    }

    #[test]
    fn mem_base_label() {
        let label = Label::from_id(77);
        let mut mem = Mem::new();
        mem.set_base_label(&label);
        assert!(mem.has_base());
        assert!(mem.has_base_label());
        assert!(!mem.has_base_reg());
        assert_eq!(mem.base_id(), 77);

        let reg_mem = Mem::base_offset(&Reg::from_type_and_id(RegType::GP64, 1), 0);
        assert!(reg_mem.has_base_reg());
        assert!(!reg_mem.has_base_label());
    }

    #[test]
    fn mem_flags() {
        let mut mem = Mem::new();
        assert_eq!(mem.addr_type(), AddrType::Default);
        mem.set_abs();
        assert!(mem.is_abs());
        mem.set_rel();
        assert!(mem.is_rel());
        mem.set_wrt();
        assert!(mem.is_wrt());
        mem.reset_addr_type();
        assert!(!mem.has_addr_type());

        assert!(!mem.is_reg_home());
        mem.set_reg_home();
        assert!(mem.is_reg_home());
        mem.clear_reg_home();
        assert!(!mem.is_reg_home());
    }

    #[test]
    fn mem_abs_constructor() {
        let mem = Mem::abs(0xDEAD_BEEF_CAFE);
        assert!(mem.is_abs());
        assert!(mem.is_offset_64bit());
        assert_eq!(mem.offset(), 0xDEAD_BEEF_CAFE);
    }

    #[test]
    fn mem_from_parts() {
        let mem = Mem::from_parts(
            RegType::GP64.bits(),
            5,
            RegType::GP64.bits(),
            12,
            -16,
            8,
            sig::MEM_REG_HOME_FLAG,
        );
        assert_eq!(mem.base_type(), RegType::GP64.bits());
        assert_eq!(mem.base_id(), 5);
        assert_eq!(mem.index_id(), 12);
        assert_eq!(mem.offset(), -16);
        assert_eq!(mem.as_operand().size(), 8);
        assert!(mem.is_reg_home());
    }

    #[test]
    fn imm_fit_predicates() {
        assert!(Imm::from_i64(127).is_int8());
        assert!(!Imm::from_i64(128).is_int8());
        assert!(Imm::from_i64(-128).is_int8());
        assert!(!Imm::from_i64(-129).is_int8());

        assert!(Imm::from_i64(255).is_uint8());
        assert!(!Imm::from_i64(-1).is_uint8());

        assert!(Imm::from_i64(0xFFFF).is_uint16());
        assert!(!Imm::from_i64(0x1_0000).is_uint16());

        assert!(Imm::from_i64(i64::from(i32::MAX)).is_int32());
        assert!(!Imm::from_i64(i64::from(i32::MAX) + 1).is_int32());
        assert!(Imm::from_i64(0xFFFF_FFFF).is_uint32());
        assert!(!Imm::from_i64(0x1_0000_0000).is_uint32());
    }

    #[test]
    fn imm_narrowing_views() {
        let imm = Imm::from_i64(0x1122_3344_5566_7788);
        assert_eq!(imm.uint8(), 0x88);
        assert_eq!(imm.uint16(), 0x7788);
        assert_eq!(imm.uint32(), 0x5566_7788);
        assert_eq!(imm.uint32_hi(), 0x1122_3344);
        assert_eq!(imm.int64(), 0x1122_3344_5566_7788);
    }

    #[test]
    fn imm_extension() {
        let mut imm = Imm::from_u64(0xFFFF_FF80);
        imm.sign_extend_8bits();
        assert_eq!(imm.int64(), -128);

        let mut imm = Imm::from_u64(0xFFFF_FF80);
        imm.zero_extend_8bits();
        assert_eq!(imm.uint64(), 0x80);

        let mut imm = Imm::from_u64(0x8000_0000);
        imm.sign_extend_32bits();
        assert_eq!(imm.int64(), i64::from(i32::MIN));
    }

    #[test]
    fn imm_float_views() {
        let mut imm = Imm::new();
        imm.set_f32(1.5);
        assert_eq!(imm.f32(), 1.5);
        assert_eq!(imm.uint32_hi(), 0);

        imm.set_f64(-2.25);
        assert_eq!(imm.f64(), -2.25);
    }

    #[test]
    fn imm_setters_extend() {
        let mut imm = Imm::new();
        imm.set_int8(-1);
        assert_eq!(imm.int64(), -1);
        imm.set_uint8(0xFF);
        assert_eq!(imm.uint64(), 0xFF);
        imm.set_int32(i32::MIN);
        assert_eq!(imm.int64(), i64::from(i32::MIN));
    }

    #[test]
    fn label_validity() {
        let unbound = Label::new();
        assert!(!unbound.is_valid());
        assert_eq!(unbound.id(), 0);

        let label = Label::from_id(9);
        assert!(label.is_valid());
        assert!(label.as_operand().is_label());

        let mut l = label;
        l.reset();
        assert!(!l.is_valid());
        assert!(l.as_operand().is_label());
    }

    #[test]
    fn variant_views_check_tag() {
        let op = Operand::from(Imm::from_i64(5));
        assert!(op.as_imm().is_some());
        assert!(op.as_reg().is_none());
        assert!(op.as_mem().is_none());
        assert!(op.as_label().is_none());

        let reg_op = Operand::from(Reg::from_type_and_id(RegType::GP8_LO, 1));
        assert_eq!(reg_op.as_reg().unwrap().reg_type(), RegType::GP8_LO);
    }

    #[test]
    fn sizes_are_fixed() {
        assert_eq!(core::mem::size_of::<Operand>(), 16);
        assert_eq!(core::mem::size_of::<Reg>(), 16);
        assert_eq!(core::mem::size_of::<Mem>(), 16);
        assert_eq!(core::mem::size_of::<Imm>(), 16);
        assert_eq!(core::mem::size_of::<Label>(), 16);
        assert_eq!(core::mem::size_of::<RegOnly>(), 8);
    }

    #[test]
    fn display_names() {
        assert_eq!(format!("{}", OpType::Mem), "mem");
        assert_eq!(format!("{}", RegType::GP64), "gp64");
        assert_eq!(format!("{}", RegType::CUSTOM), "custom0");
        assert_eq!(format!("{}", RegGroup::VEC), "vec");
        assert_eq!(format!("{}", AddrType::Wrt), "wrt");
    }
}

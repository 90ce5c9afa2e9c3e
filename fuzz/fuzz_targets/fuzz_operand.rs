#![no_main]
use libfuzzer_sys::fuzz_target;

use jitop_rs::{CallConv, CallConvId, Operand};

fuzz_target!(|data: &[u8]| {
    // Reconstruct an operand from arbitrary words. Every accessor must be
    // total over garbage signatures — no panic, no wrap-around surprise.
    if data.len() < 20 {
        return;
    }
    let word = |i: usize| u32::from_le_bytes([data[i], data[i + 1], data[i + 2], data[i + 3]]);
    let op = Operand::from_words(word(0), word(4), word(8), word(12));

    let _ = op.op_type();
    let _ = op.is_none();
    let _ = op.is_phys_reg();
    let _ = op.is_virt_reg();
    let _ = op.size();
    let _ = op.id();

    if let Some(reg) = op.as_reg() {
        let _ = reg.reg_type();
        let _ = reg.group();
        let _ = reg.is_gp();
        let _ = reg.is_vec();
    }
    if let Some(mem) = op.as_mem() {
        let _ = mem.base_type();
        let _ = mem.index_type();
        let _ = mem.addr_type();
        let _ = mem.is_offset_64bit();
        let _ = mem.offset();
        let _ = mem.has_base_label();
    }
    if let Some(imm) = op.as_imm() {
        let _ = imm.int64();
        let _ = imm.f64();
        let _ = imm.is_int8();
    }
    if let Some(label) = op.as_label() {
        let _ = label.is_valid();
    }

    // Round-trip through the raw words is lossless.
    let words = op.words();
    assert_eq!(
        Operand::from_words(words[0], words[1], words[2], words[3]),
        op
    );

    // CallConv::init must never panic, only return Ok/Err.
    let mut cc = CallConv::new();
    let _ = cc.init(CallConvId::from_raw(word(16)));
});

//! Performance benchmarks for jitop_rs.
//!
//! Measures:
//! - Operand construction (register, memory, immediate)
//! - Operand comparison (bitwise equality and group-template checks)
//! - Calling-convention initialization
//!
//! Run with: `cargo bench`

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use jitop_rs::{CallConv, CallConvId, Imm, Mem, Reg, RegType};

// ─── Construction ────────────────────────────────────────────────────────────

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("reg_from_type_and_id", |b| {
        b.iter(|| Reg::from_type_and_id(black_box(RegType::GP64), black_box(7)))
    });

    group.bench_function("mem_base_offset", |b| {
        let base = Reg::from_type_and_id(RegType::GP64, 5);
        b.iter(|| Mem::base_offset(black_box(&base), black_box(-8)))
    });

    group.bench_function("mem_set_offset_64bit", |b| {
        b.iter(|| {
            let mut mem = Mem::new();
            mem.set_offset(black_box(0x1_0000_0008));
            mem
        })
    });

    group.bench_function("imm_fit_check", |b| {
        let imm = Imm::from_i64(100);
        b.iter(|| black_box(&imm).is_int8())
    });

    group.finish();
}

// ─── Comparison ──────────────────────────────────────────────────────────────

fn bench_comparison(c: &mut Criterion) {
    let mut group = c.benchmark_group("comparison");

    let a = Reg::from_type_and_id(RegType::GP64, 3);
    let b_reg = Reg::from_type_and_id(RegType::GP64, 4);

    group.bench_function("reg_is_same", |b| {
        b.iter(|| black_box(&a).is_same(black_box(&b_reg)))
    });

    group.bench_function("reg_is_gp", |b| b.iter(|| black_box(&a).is_gp()));

    let op_a = jitop_rs::Operand::from(a);
    let op_b = jitop_rs::Operand::from(b_reg);
    group.bench_function("operand_eq", |b| {
        b.iter(|| black_box(&op_a) == black_box(&op_b))
    });

    group.finish();
}

// ─── Calling conventions ─────────────────────────────────────────────────────

fn bench_callconv(c: &mut Criterion) {
    let mut group = c.benchmark_group("callconv");

    group.bench_function("init_sysv64", |b| {
        b.iter(|| {
            let mut cc = CallConv::new();
            cc.init(black_box(CallConvId::X86_SYS_V64)).unwrap();
            cc
        })
    });

    group.bench_function("init_aapcs64", |b| {
        b.iter(|| {
            let mut cc = CallConv::new();
            cc.init(black_box(CallConvId::AARCH64_AAPCS)).unwrap();
            cc
        })
    });

    group.finish();
}

criterion_group!(benches, bench_construction, bench_comparison, bench_callconv);
criterion_main!(benches);

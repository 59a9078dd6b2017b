/// Benchmark of the block mix loop across representative effects.

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use ambifx::{ChannelFormat, EffectKind, Engine};

const FRAMES: usize = 4096;

fn bench_effect(c: &mut Criterion, name: &str, kind: EffectKind) {
    let mut engine = Engine::new(ChannelFormat::Stereo, 48_000, 1).unwrap();
    engine.set_effect_type(0, kind).unwrap();
    engine.apply_changes().unwrap();

    let src: Vec<f32> = (0..FRAMES * 2)
        .map(|i| ((i as f32) * 0.0137).sin() * 0.5)
        .collect();
    let mut dst = vec![0.0f32; FRAMES * 2];

    c.bench_function(name, |b| {
        b.iter(|| {
            dst.fill(0.0);
            engine
                .mix(black_box(FRAMES), black_box(&src), &mut dst)
                .unwrap();
        });
    });
}

fn mix_benchmarks(c: &mut Criterion) {
    bench_effect(c, "mix_null", EffectKind::Null);
    bench_effect(c, "mix_echo", EffectKind::Echo);
    bench_effect(c, "mix_equalizer", EffectKind::Equalizer);
    bench_effect(c, "mix_eax_reverb", EffectKind::EaxReverb);
}

criterion_group!(benches, mix_benchmarks);
criterion_main!(benches);

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gamemng::session::{build_record, decode, encode_frame, Framer, Framing};

fn bench_decode(c: &mut Criterion) {
    c.bench_function("decode_status_text", |b| {
        b.iter(|| decode(black_box(b"Round 3 starting, get ready")))
    });
    c.bench_function("decode_game_start", |b| {
        b.iter(|| decode(black_box(b"esp_gamestart")))
    });
}

fn bench_encode(c: &mut Criterion) {
    let record = build_record("player-one", "Green", "Lunatic");

    c.bench_function("encode_entry_raw", |b| {
        b.iter(|| encode_frame(black_box(&record), Framing::Raw))
    });
    c.bench_function("encode_entry_line", |b| {
        b.iter(|| encode_frame(black_box(&record), Framing::Line))
    });
}

fn bench_line_framer(c: &mut Criterion) {
    let chunk: Vec<u8> = (0..16)
        .flat_map(|i| format!("status update {}\r\n", i).into_bytes())
        .collect();

    c.bench_function("line_framer_16_messages", |b| {
        let mut framer = Framer::new(Framing::Line);
        b.iter(|| {
            let mut units = 0usize;
            let _ = framer.push(black_box(&chunk), |unit| {
                units += unit.len();
                Ok(())
            });
            units
        })
    });
}

criterion_group!(benches, bench_decode, bench_encode, bench_line_framer);
criterion_main!(benches);

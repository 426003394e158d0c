use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use he3map::io::compression::{Compressor, Decompressor, LzfCompressor, LzfDecompressor, MatchDictionary};
use he3map::{decode_map, encode_map, MapDocument, MapTile, TerrainType};

fn text_like(len: usize) -> Vec<u8> {
    b"hexmap grass sand farmland forest snow airport factory town city capital "
        .iter()
        .copied()
        .cycle()
        .take(len)
        .collect()
}

fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9u32;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            (state >> 24) as u8
        })
        .collect()
}

fn sample_map(width: usize, depth: usize) -> MapDocument {
    let mut doc = MapDocument::new(width, depth);
    doc.title = "bench".into();
    for x in 0..width {
        for z in 0..depth {
            let terrain = TerrainType::ALL[(x * 7 + z * 3) % TerrainType::ALL.len()];
            let height = ((x + z) % 10) as f32 / 10.0 - 0.2;
            if let Some(tile) = doc.tile_mut(x, z) {
                *tile = MapTile::with_city(height, terrain, format!("c{x}_{z}"));
            }
        }
    }
    doc
}

fn bench_compress(c: &mut Criterion) {
    let mut group = c.benchmark_group("compress_lzf");
    for (name, data) in [("text", text_like(64 * 1024)), ("noise", noise(64 * 1024))] {
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(BenchmarkId::new("fresh_dict", name), &data, |b, data| {
            let compressor = LzfCompressor::new();
            b.iter(|| compressor.compress(black_box(data)).unwrap());
        });
        group.bench_with_input(BenchmarkId::new("reused_dict", name), &data, |b, data| {
            let compressor = LzfCompressor::new();
            let mut dict = MatchDictionary::new();
            b.iter(|| compressor.compress_with(black_box(data), &mut dict).unwrap());
        });
    }
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompress_lzf");
    for (name, data) in [("text", text_like(64 * 1024)), ("noise", noise(64 * 1024))] {
        let tokens = LzfCompressor::new().compress(&data).unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_function(BenchmarkId::new("lzf", name), |b| {
            let decompressor = LzfDecompressor::new();
            b.iter(|| decompressor.decompress(black_box(&tokens)).unwrap());
        });
    }
    group.finish();
}

fn bench_map(c: &mut Criterion) {
    let doc = sample_map(64, 48);
    let transport = encode_map(&doc).unwrap();

    let mut group = c.benchmark_group("map_codec");
    group.bench_function("encode_64x48", |b| b.iter(|| encode_map(black_box(&doc)).unwrap()));
    group.bench_function("decode_64x48", |b| {
        b.iter(|| decode_map(black_box(&transport)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_map);
criterion_main!(benches);

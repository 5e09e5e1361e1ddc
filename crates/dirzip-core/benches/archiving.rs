//! Benchmarks for directory archiving.
//!
//! Measures traversal alone and full ZIP creation across tree shapes and
//! compression levels.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use dirzip_core::ArchiveConfig;
use dirzip_core::DirArchiver;
use dirzip_core::create_archive;
use std::fs;
use std::hint::black_box;
use std::path::Path;
use std::path::PathBuf;
use tempfile::TempDir;

/// Creates a flat directory with `file_count` files of 1 KB each.
fn create_flat_directory(temp: &TempDir, file_count: usize) -> PathBuf {
    let dir = temp.path().join("flat");
    fs::create_dir_all(&dir).unwrap();

    let content = "x".repeat(1024);
    for i in 0..file_count {
        fs::write(dir.join(format!("file_{i:05}.txt")), &content).unwrap();
    }

    dir
}

/// Creates a chain of nested directories with a few files per level.
fn create_nested_directory(temp: &TempDir, depth: usize, files_per_level: usize) -> PathBuf {
    fn create_level(base: &Path, current_depth: usize, max_depth: usize, files: usize) {
        if current_depth >= max_depth {
            return;
        }

        for i in 0..files {
            fs::write(base.join(format!("file_{i}.txt")), "content\n").unwrap();
        }

        let subdir = base.join(format!("level_{}", current_depth + 1));
        fs::create_dir_all(&subdir).unwrap();
        create_level(&subdir, current_depth + 1, max_depth, files);
    }

    let root = temp.path().join("nested");
    fs::create_dir_all(&root).unwrap();
    create_level(&root, 0, depth, files_per_level);
    root
}

fn benchmark_plan(c: &mut Criterion) {
    let mut group = c.benchmark_group("plan");
    let temp = TempDir::new().unwrap();

    for (name, root) in [
        ("flat_500", create_flat_directory(&temp, 500)),
        ("nested_50x10", create_nested_directory(&temp, 50, 10)),
    ] {
        let config = ArchiveConfig::new(&root, temp.path().join("unused.zip"))
            .with_excluded_paths(vec!["file_00001.txt".into(), "level_1/level_2".into()]);
        let archiver = DirArchiver::new(&config).unwrap();

        group.bench_with_input(BenchmarkId::new("walk", name), &archiver, |b, archiver| {
            b.iter(|| black_box(archiver.plan().unwrap()));
        });
    }

    group.finish();
}

fn benchmark_compression_levels(c: &mut Criterion) {
    let mut group = c.benchmark_group("compression_levels");
    let temp = TempDir::new().unwrap();
    let source_dir = create_flat_directory(&temp, 100);
    let output = temp.path().join("output.zip");

    for level in [1u8, 6, 9] {
        group.bench_with_input(BenchmarkId::new("zip_level", level), &level, |b, level| {
            let config = ArchiveConfig::new(&source_dir, &output).with_compression_level(*level);
            b.iter(|| black_box(create_archive(&config).unwrap()));
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_plan, benchmark_compression_levels);
criterion_main!(benches);

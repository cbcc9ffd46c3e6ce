// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use repo_api::{ReleaseIndex, RepositoryId, SiteConfig};

fn benchmark_parse_config(c: &mut Criterion,)
{
    let yaml = r"
output: public/api
api:
  - type: release+contributor
    repositories:
      - octocat/hello-world
      - rust-lang/rust
  - type: social
    discord: https://discord.gg/example
    twitter: example
";

    c.bench_function("parse_config_small", |b| {
        b.iter(|| SiteConfig::parse(black_box(yaml,),).expect("parse failed",),)
    },);
}

fn benchmark_large_config_parse(c: &mut Criterion,)
{
    let mut yaml = String::from("output: public/api\napi:\n  - type: release+contributor\n    repositories:\n",);
    for i in 0..100 {
        yaml.push_str(&format!("      - user{i}/repo{i}\n"),);
    }

    c.bench_function("parse_100_repositories", |b| {
        b.iter(|| SiteConfig::parse(black_box(&yaml,),).expect("parse failed",),)
    },);
}

fn benchmark_repository_parse(c: &mut Criterion,)
{
    c.bench_function("repository_parse", |b| {
        b.iter(|| RepositoryId::parse(black_box("rust-lang/rust-analyzer",),).expect("valid",),)
    },);
}

fn benchmark_index_insert(c: &mut Criterion,)
{
    let tags: Vec<String,> = (0..200).map(|i| format!("v1.{i}.0"),).collect();

    c.bench_function("index_insert_200_tags_twice", |b| {
        b.iter(|| {
            let mut index = ReleaseIndex::default();
            for tag in tags.iter().chain(tags.iter(),) {
                index.insert(black_box(tag,),);
            }
            black_box(index.tags().len(),)
        },)
    },);
}

criterion_group!(
    benches,
    benchmark_parse_config,
    benchmark_large_config_parse,
    benchmark_repository_parse,
    benchmark_index_insert
);
criterion_main!(benches);

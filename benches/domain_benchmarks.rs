use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use secrecy::SecretString;
use validator::Validate;

use xrpl_ledger_relay::domain::types::TrustLineRequest;
use xrpl_ledger_relay::domain::{engine_result, validation};

fn bench_address_validation(c: &mut Criterion) {
    let address = "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh";

    c.bench_function("is_classic_address", |b| {
        b.iter(|| validation::is_classic_address(black_box(address)))
    });
}

fn bench_tx_hash_validation(c: &mut Criterion) {
    let hash = "E3FE6EA3D48F0C2B639448020EA4F03D4F4F8FFDB243A852A0F59177921B4879";

    c.bench_function("validate_tx_hash", |b| {
        b.iter(|| {
            let _ = validation::validate_tx_hash(black_box(hash));
        })
    });
}

fn bench_engine_result_classification(c: &mut Criterion) {
    c.bench_function("classify_engine_result", |b| {
        b.iter(|| {
            let _ = engine_result::classify(black_box("tecUNFUNDED"), None);
        })
    });

    c.bench_function("describe_engine_result", |b| {
        b.iter(|| engine_result::describe(black_box("tecPATH_DRY")))
    });
}

fn bench_request_validation(c: &mut Criterion) {
    let request = TrustLineRequest {
        sender_seed: SecretString::from("snoPBrXtMeMyMHUVTgbuqAfg1SUTb"),
        issuer_address: "rHb9CJAWyB4rj91VRWn96DkukG4bwdtyTh".to_string(),
        currency_code: "USD".to_string(),
        limit: "100".to_string(),
    };

    c.bench_function("validate_trust_line_request", |b| {
        b.iter(|| {
            let _ = black_box(&request).validate();
        })
    });
}

criterion_group!(
    benches,
    bench_address_validation,
    bench_tx_hash_validation,
    bench_engine_result_classification,
    bench_request_validation
);
criterion_main!(benches);

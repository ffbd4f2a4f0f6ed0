//! Integration tests for `fq query`.

mod common;

use common::fq;
use predicates::prelude::*;

fn query_json(text: &str) -> serde_json::Value {
    let output = fq().args(["query", text]).assert().success();
    let stdout = String::from_utf8(output.get_output().stdout.clone()).unwrap();
    serde_json::from_str(&stdout).unwrap()
}

#[test]
fn test_crypto_query_cites_only_crypto_records() {
    let parsed = query_json("Find crypto wallet mentions");
    let citations = parsed["reply"]["citations"].as_array().unwrap();
    assert!(!citations.is_empty());
    for cite in citations {
        let flags = cite["flaggedEntities"].as_array().unwrap();
        let joined = flags
            .iter()
            .map(|f| f.as_str().unwrap().to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        assert!(
            ["crypto", "wallet", "btc", "usdt", "tether", "binance"]
                .iter()
                .any(|kw| joined.contains(kw)),
            "citation {} has no crypto flag",
            cite["id"]
        );
    }
}

#[test]
fn test_breakdown_counts_sum_to_citation_count() {
    for text in ["crypto wallets", "dubai numbers", "hawala", "unmatched topic"] {
        let parsed = query_json(text);
        let citations = parsed["reply"]["citations"].as_array().unwrap().len();
        let breakdown = parsed["reply"]["riskBreakdown"].as_object().unwrap();
        let total: u64 = breakdown.values().map(|v| v.as_u64().unwrap()).sum();
        assert_eq!(total as usize, citations, "query: {}", text);
    }
}

#[test]
fn test_reply_sections_present() {
    let parsed = query_json("Show communications with foreign numbers");
    let content = parsed["reply"]["content"].as_str().unwrap();
    assert!(content.contains("### Summary"));
    assert!(content.contains("### Risk Assessment"));
    assert!(content.contains("### Evidence Records"));
    assert_eq!(parsed["reply"]["role"], "assistant");
}

#[test]
fn test_blank_query_is_rejected() {
    fq().args(["query", "   "])
        .assert()
        .failure()
        .stderr(predicate::str::contains("blank"));
}

#[test]
fn test_human_output_lists_citations() {
    fq().args(["-H", "query", "hawala or cash pickup"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Citations:"))
        .stdout(predicate::str::contains("["));
}

#[test]
fn test_same_query_is_deterministic() {
    let a = query_json("anti-forensic intent");
    let b = query_json("anti-forensic intent");
    assert_eq!(a["reply"]["content"], b["reply"]["content"]);
    assert_eq!(a["reply"]["citations"], b["reply"]["citations"]);
}

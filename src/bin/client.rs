//! Command-line test client for the MedAssist API.
//!
//! Checks the health endpoint, then sends the query given on the command
//! line (or a couple of built-in examples) and prints the structured
//! answer. Point it at a remote host with MEDASSIST_URL.

use std::process::ExitCode;

use serde_json::json;

const EXAMPLE_QUERIES: &[&str] = &[
    "What are the symptoms of a common cold?",
    "What should I do if I have a fever?",
];

fn main() -> ExitCode {
    let base_url = std::env::var("MEDASSIST_URL")
        .unwrap_or_else(|_| "http://localhost:8000".to_string());
    let client = reqwest::blocking::Client::new();

    println!("Testing MedAssist API at {base_url}\n");

    if !check_health(&client, &base_url) {
        eprintln!("Server is not responding. Make sure:");
        eprintln!("  1. The server is running");
        eprintln!("  2. MEDASSIST_URL points at it (currently {base_url})");
        return ExitCode::FAILURE;
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    let ok = if args.is_empty() {
        EXAMPLE_QUERIES
            .iter()
            .all(|q| ask_question(&client, &base_url, q))
    } else {
        ask_question(&client, &base_url, &args.join(" "))
    };

    if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}

fn check_health(client: &reqwest::blocking::Client, base_url: &str) -> bool {
    let response = match client.get(format!("{base_url}/api/health")).send() {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Health check failed: {e}\n");
            return false;
        }
    };

    println!("Health check: {}", response.status());
    if !response.status().is_success() {
        return false;
    }
    if let Ok(health) = response.json::<serde_json::Value>() {
        println!("  Service: {}", health["service"].as_str().unwrap_or("N/A"));
        println!("  Model:   {}", health["model"].as_str().unwrap_or("N/A"));
        println!("  Version: {}\n", health["version"].as_str().unwrap_or("N/A"));
    }
    true
}

fn ask_question(client: &reqwest::blocking::Client, base_url: &str, query: &str) -> bool {
    println!("Query: {query}");

    let response = match client
        .post(format!("{base_url}/ask"))
        .json(&json!({ "query": query }))
        .send()
    {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Request failed: {e}\n");
            return false;
        }
    };

    if !response.status().is_success() {
        eprintln!("Error: {}", response.status());
        eprintln!("{}\n", response.text().unwrap_or_default());
        return false;
    }

    let answer: serde_json::Value = match response.json() {
        Ok(v) => v,
        Err(e) => {
            eprintln!("Malformed response body: {e}\n");
            return false;
        }
    };

    println!("\nDiagnosis/Assessment:");
    println!("  {}", answer["diagnosis"].as_str().unwrap_or("N/A"));
    println!("\nAdvice/Recommendations:");
    println!("  {}", answer["advice"].as_str().unwrap_or("N/A"));
    if let Some(confidence) = answer["confidence"].as_str() {
        println!("\nConfidence: {confidence}");
    }
    println!();
    true
}

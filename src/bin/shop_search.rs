// src/bin/shop_search.rs
// Terminal client for a running shop-map service: runs one search and prints
// every marker with its popup cards.
use anyhow::{bail, Context, Result};
use dotenv::dotenv;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::process;
use std::time::{Duration, Instant};

// --- ANSI colors ---
const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const BLUE: &str = "\x1b[34m";
const MAGENTA: &str = "\x1b[35m";
const CYAN: &str = "\x1b[36m";

// --- Response shapes (subset of what the service returns) ---

#[derive(Deserialize, Debug)]
struct LatLng {
    lat: f64,
    lng: f64,
}

#[derive(Deserialize, Debug)]
struct TelLink {
    display: String,
}

#[derive(Deserialize, Debug)]
struct ShopCard {
    title: String,
    tag: String,
    exclusive: bool,
    #[serde(default)]
    address: String,
    tel: Option<TelLink>,
    url: Option<String>,
}

#[derive(Deserialize, Debug)]
struct EntityKind {
    kind: String,
}

#[derive(Deserialize, Debug)]
struct Marker {
    position: LatLng,
    entity: EntityKind,
    popup: Vec<ShopCard>,
}

#[derive(Deserialize, Debug)]
struct SearchResponse {
    center: LatLng,
    distance: u32,
    total_shops: usize,
    markers: Vec<Marker>,
}

#[derive(Deserialize, Debug)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize, Debug)]
struct ErrorDetail {
    code: String,
    message: String,
}

#[derive(Debug, PartialEq)]
struct SearchArgs {
    lat: f64,
    lng: f64,
    distance: Option<u32>,
    tag: Option<String>,
    exclusive_only: bool,
}

fn parse_args(args: &[String]) -> Result<SearchArgs> {
    let exclusive_only = args.iter().any(|a| a == "--exclusive");
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();

    if positional.len() < 2 {
        bail!("usage: shop_search <lat> <lng> [distance] [tag] [--exclusive]");
    }

    let lat = positional[0]
        .parse()
        .with_context(|| format!("invalid latitude: {}", positional[0]))?;
    let lng = positional[1]
        .parse()
        .with_context(|| format!("invalid longitude: {}", positional[1]))?;
    let distance = positional
        .get(2)
        .map(|d| d.parse::<u32>())
        .transpose()
        .context("invalid distance")?;
    let tag = positional.get(3).map(|t| t.to_string());

    Ok(SearchArgs {
        lat,
        lng,
        distance,
        tag,
        exclusive_only,
    })
}

struct ShopSearchClient {
    base_url: String,
    client: Client,
}

impl ShopSearchClient {
    fn new(base_url: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self { base_url, client })
    }

    async fn check_service_health(&self) -> bool {
        match self.client.get(format!("{}/health", self.base_url)).send().await {
            Ok(resp) => resp.status().is_success(),
            Err(_) => false,
        }
    }

    async fn search(&self, args: &SearchArgs) -> Result<SearchResponse> {
        let mut query = vec![
            ("lat", args.lat.to_string()),
            ("lng", args.lng.to_string()),
            ("exclusive_only", args.exclusive_only.to_string()),
        ];
        if let Some(distance) = args.distance {
            query.push(("distance", distance.to_string()));
        }
        if let Some(tag) = &args.tag {
            query.push(("tag", tag.clone()));
        }

        let response = self
            .client
            .get(format!("{}/shops/search", self.base_url))
            .query(&query)
            .send()
            .await
            .context("search request failed")?;

        if response.status().is_success() {
            return response
                .json::<SearchResponse>()
                .await
                .context("Failed to parse response JSON");
        }

        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        match serde_json::from_str::<ErrorBody>(&body) {
            Ok(err) => bail!("HTTP {} - {}: {}", status, err.error.code, err.error.message),
            Err(_) => bail!("HTTP {} - {}", status, body),
        }
    }
}

fn print_results(result: &SearchResponse, elapsed: Duration) {
    println!(
        "\n{}📍 Center ({:.6}, {:.6}), radius {}m{}",
        BOLD, result.center.lat, result.center.lng, result.distance, RESET
    );
    println!("──────────────────────────────────────────────────────────────");

    for (i, marker) in result.markers.iter().enumerate() {
        let grouped = marker.entity.kind == "group";
        let header_color = if grouped { MAGENTA } else { CYAN };
        println!(
            "{}[{}] {} ({:.6}, {:.6}){}",
            header_color,
            i + 1,
            if grouped {
                format!("🏬 {} shops at one spot", marker.popup.len())
            } else {
                "🏪".to_string()
            },
            marker.position.lat,
            marker.position.lng,
            RESET
        );

        for card in &marker.popup {
            let badge = if card.exclusive {
                format!("{}専用{}", YELLOW, RESET)
            } else {
                format!("{}共通{}", BLUE, RESET)
            };
            println!("    {}{}{} [{}] {}", BOLD, card.title, RESET, card.tag, badge);
            if !card.address.is_empty() {
                println!("      {}", card.address);
            }
            if let Some(tel) = &card.tel {
                println!("      ☎ {}", tel.display);
            }
            if let Some(url) = &card.url {
                println!("      🔗 {}", url);
            }
        }
    }

    let groups = result
        .markers
        .iter()
        .filter(|m| m.entity.kind == "group")
        .count();

    println!("──────────────────────────────────────────────────────────────");
    println!("{}📊 Totals:{}", BOLD, RESET);
    println!("  • Shops: {}{}{}", GREEN, result.total_shops, RESET);
    println!("  • Markers: {}{}{}", GREEN, result.markers.len(), RESET);
    println!("  • Shared spots: {}{}{}", MAGENTA, groups, RESET);
    println!("  • Duration: {:.2}s", elapsed.as_secs_f64());
}

#[tokio::main]
async fn main() {
    dotenv().ok();

    let args: Vec<String> = env::args().skip(1).collect();
    let search_args = match parse_args(&args) {
        Ok(parsed) => parsed,
        Err(e) => {
            eprintln!("{}{}{}", RED, e, RESET);
            process::exit(2);
        }
    };

    let base_url = env::var("SHOP_MAP_URL").unwrap_or_else(|_| "http://localhost:8003".to_string());
    let client = match ShopSearchClient::new(base_url.trim_end_matches('/').to_string()) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{}❌ {:#}{}", RED, e, RESET);
            process::exit(1);
        }
    };

    println!("{}🔍 Checking service status...{}", CYAN, RESET);
    if !client.check_service_health().await {
        println!("{}❌ Service unavailable at {}.{}", RED, client.base_url, RESET);
        println!("{}Please ensure shop-map is running (cargo run){}", YELLOW, RESET);
        process::exit(1);
    }

    let started = Instant::now();
    match client.search(&search_args).await {
        Ok(result) => print_results(&result, started.elapsed()),
        Err(e) => {
            println!("{}❌ Search failed: {:#}{}", RED, e, RESET);
            process::exit(1);
        }
    }
}

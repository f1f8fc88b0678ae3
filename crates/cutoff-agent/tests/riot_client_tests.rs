//! RiotClient against an in-process HTTP stub on 127.0.0.1.
//!
//! The stub answers by path suffix so each test can shape status codes and
//! bodies per league page without a live ranked API.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use cutoff_agent::RiotClient;
use ladder::{
    process_region, Credential, CutoffFloors, FetchError, LeagueSource, Queue, QueueSizes, Tier,
    TierSizes,
};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

// ── Stub server ──────────────────────────────────────────────────────────────

#[derive(Clone)]
enum Reply {
    Respond { status: u16, body: String },
    Hang,
}

#[derive(Default)]
struct Seen {
    paths: Vec<String>,
    tokens: Vec<String>,
}

/// Serve `routes` (path suffix → reply) until the test ends. Unknown paths
/// get 404.
async fn start_stub(routes: HashMap<String, Reply>) -> (String, Arc<Mutex<Seen>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let seen = Arc::new(Mutex::new(Seen::default()));
    let routes = Arc::new(routes);

    let seen_task = seen.clone();
    tokio::spawn(async move {
        loop {
            let Ok((mut stream, _)) = listener.accept().await else {
                return;
            };
            let routes = routes.clone();
            let seen = seen_task.clone();
            tokio::spawn(async move {
                let mut buf = Vec::new();
                let mut chunk = [0u8; 1024];
                while !buf.windows(4).any(|w| w == b"\r\n\r\n") {
                    match stream.read(&mut chunk).await {
                        Ok(0) | Err(_) => return,
                        Ok(n) => buf.extend_from_slice(&chunk[..n]),
                    }
                }
                let head = String::from_utf8_lossy(&buf).to_string();
                let path = head
                    .lines()
                    .next()
                    .and_then(|l| l.split_whitespace().nth(1))
                    .unwrap_or("/")
                    .to_string();
                let token = head
                    .lines()
                    .find_map(|l| {
                        let (name, value) = l.split_once(':')?;
                        name.eq_ignore_ascii_case("x-riot-token")
                            .then(|| value.trim().to_string())
                    })
                    .unwrap_or_default();
                {
                    let mut seen = seen.lock().unwrap();
                    seen.paths.push(path.clone());
                    seen.tokens.push(token);
                }

                let reply = routes
                    .iter()
                    .find(|(suffix, _)| path.ends_with(suffix.as_str()))
                    .map(|(_, r)| r.clone())
                    .unwrap_or(Reply::Respond {
                        status: 404,
                        body: r#"{"status":{"message":"Data not found","status_code":404}}"#.into(),
                    });

                match reply {
                    Reply::Respond { status, body } => {
                        let response = format!(
                            "HTTP/1.1 {status} Stub\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                            body.len()
                        );
                        let _ = stream.write_all(response.as_bytes()).await;
                        let _ = stream.shutdown().await;
                    }
                    Reply::Hang => {
                        tokio::time::sleep(Duration::from_secs(30)).await;
                    }
                }
            });
        }
    });

    (format!("http://{addr}"), seen)
}

fn page(lp: &[i64]) -> Reply {
    let entries: Vec<String> = lp
        .iter()
        .enumerate()
        .map(|(i, p)| format!(r#"{{"summonerId":"s{i}","leaguePoints":{p},"rank":"I"}}"#))
        .collect();
    Reply::Respond {
        status: 200,
        body: format!(r#"{{"tier":"X","entries":[{}]}}"#, entries.join(",")),
    }
}

fn route(tier: Tier, queue: Queue) -> String {
    format!("/{}/by-queue/{}", tier.league_path(), queue.as_str())
}

fn client(base: &str) -> RiotClient {
    RiotClient::with_gateway(base, Duration::from_secs(2)).unwrap()
}

// ── Single page ──────────────────────────────────────────────────────────────

#[tokio::test]
async fn fetches_lp_and_sends_token_header() {
    let routes = HashMap::from([(
        route(Tier::Challenger, Queue::RankedSolo5x5),
        page(&[1620, 1544]),
    )]);
    let (base, seen) = start_stub(routes).await;

    let lp = client(&base)
        .fetch_page(
            "EUW1",
            Tier::Challenger,
            Queue::RankedSolo5x5,
            &Credential::new("RGAPI-stub"),
        )
        .await
        .unwrap();

    assert_eq!(lp, vec![1620, 1544]);
    let seen = seen.lock().unwrap();
    assert_eq!(
        seen.paths,
        vec!["/euw1/lol/league/v4/challengerleagues/by-queue/RANKED_SOLO_5x5".to_string()]
    );
    assert_eq!(seen.tokens, vec!["RGAPI-stub".to_string()]);
}

#[tokio::test]
async fn non_success_status_is_a_status_error() {
    let routes = HashMap::from([(
        route(Tier::Master, Queue::RankedFlexSr),
        Reply::Respond {
            status: 429,
            body: r#"{"status":{"message":"Rate limit exceeded"}}"#.into(),
        },
    )]);
    let (base, _) = start_stub(routes).await;

    let err = client(&base)
        .fetch_page("NA1", Tier::Master, Queue::RankedFlexSr, &Credential::new("k"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Status { status: 429, .. }), "{err}");
    assert!(!err.is_decode());
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let routes = HashMap::from([(
        route(Tier::Grandmaster, Queue::RankedSolo5x5),
        Reply::Respond {
            status: 200,
            body: r#"{"entries":[{"leaguePoints":"lots"}]}"#.into(),
        },
    )]);
    let (base, _) = start_stub(routes).await;

    let err = client(&base)
        .fetch_page("KR", Tier::Grandmaster, Queue::RankedSolo5x5, &Credential::new("k"))
        .await
        .unwrap_err();

    assert!(err.is_decode(), "{err}");
    assert!(err.to_string().contains("lots"));
}

#[tokio::test]
async fn refused_connection_is_a_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = client(&format!("http://{addr}"))
        .fetch_page("BR1", Tier::Challenger, Queue::RankedSolo5x5, &Credential::new("k"))
        .await
        .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }), "{err}");
}

#[tokio::test]
async fn hung_server_hits_request_timeout() {
    let routes = HashMap::from([(route(Tier::Challenger, Queue::RankedFlexSr), Reply::Hang)]);
    let (base, _) = start_stub(routes).await;

    let client = RiotClient::with_gateway(&base, Duration::from_millis(200)).unwrap();
    let err = tokio::time::timeout(
        Duration::from_secs(5),
        client.fetch_page("OC1", Tier::Challenger, Queue::RankedFlexSr, &Credential::new("k")),
    )
    .await
    .expect("client timeout should fire first")
    .unwrap_err();

    assert!(matches!(err, FetchError::Transport { .. }), "{err}");
}

// ── Region over HTTP ─────────────────────────────────────────────────────────

#[tokio::test]
async fn region_cutoffs_over_http() {
    let mut routes = HashMap::new();
    routes.insert(route(Tier::Challenger, Queue::RankedSolo5x5), page(&[1300, 1250, 1210]));
    routes.insert(route(Tier::Grandmaster, Queue::RankedSolo5x5), page(&[900, 1220]));
    routes.insert(route(Tier::Master, Queue::RankedSolo5x5), page(&[400, 380]));
    routes.insert(route(Tier::Challenger, Queue::RankedFlexSr), page(&[640]));
    routes.insert(route(Tier::Grandmaster, Queue::RankedFlexSr), page(&[]));
    routes.insert(route(Tier::Master, Queue::RankedFlexSr), page(&[150]));
    let (base, seen) = start_stub(routes).await;

    let sizes = QueueSizes {
        solo_duo: TierSizes::new(3, 2),
        flex: TierSizes::new(1, 1),
    };
    let cutoffs = process_region(
        Arc::new(client(&base)),
        "LA2",
        sizes,
        &Credential::new("k"),
        CutoffFloors::default(),
    )
    .await
    .unwrap();

    // solo: 1300 1250 1220 1210 900 400 380
    assert_eq!(cutoffs.solo_duo.challenger, 1220);
    assert_eq!(cutoffs.solo_duo.grandmaster, 900);
    // flex: 640 150 → challenger 640, grandmaster max(200, 150)
    assert_eq!(cutoffs.flex.challenger, 640);
    assert_eq!(cutoffs.flex.grandmaster, 200);
    assert_eq!(seen.lock().unwrap().paths.len(), 6);
}

#[tokio::test]
async fn region_fails_when_one_page_is_unavailable() {
    let mut routes = HashMap::new();
    for queue in Queue::ALL {
        for tier in Tier::ALL {
            routes.insert(route(tier, queue), page(&[700]));
        }
    }
    routes.insert(
        route(Tier::Grandmaster, Queue::RankedFlexSr),
        Reply::Respond {
            status: 503,
            body: String::new(),
        },
    );
    let (base, _) = start_stub(routes).await;

    let err = process_region(
        Arc::new(client(&base)),
        "TR1",
        QueueSizes {
            solo_duo: TierSizes::new(1, 1),
            flex: TierSizes::new(1, 1),
        },
        &Credential::new("k"),
        CutoffFloors::default(),
    )
    .await
    .unwrap_err();

    assert_eq!(err.failures.len(), 1);
    assert!(err.failed(Tier::Grandmaster, Queue::RankedFlexSr));
}

use std::time::Duration;

use super::*;
use crate::{client::ClientConfig, layout::spiral::compute_positions};

fn seeded() -> PartyConfig {
    PartyConfig {
        disco: DiscoConfig {
            period: Duration::from_millis(50),
            max_color_attempts: 20,
        },
        seed: Some(11),
    }
}

#[tokio::test]
async fn adding_one_at_a_time_matches_direct_layout() {
    let mut party = Party::new(seeded());
    assert!(party.is_empty());
    assert!(party.positions().is_empty());

    let mut seen = Vec::new();
    for n in 1..=9 {
        party.add_square().await;
        let positions = party.positions();
        assert_eq!(positions.len(), n);
        assert_eq!(&positions[..seen.len()], seen.as_slice());
        seen = positions;
    }
    assert_eq!(seen, compute_positions(9));
    assert_eq!(party.adjacent(4), BTreeSet::from([1, 5]));
}

#[tokio::test]
async fn new_squares_keep_their_original_color() {
    let mut party = Party::new(seeded());
    let sq = party.add_square().await;
    assert_eq!(sq.original_color.as_deref(), Some(sq.color.as_str()));
    assert_eq!(party.snapshot().squares, vec![sq]);
}

#[tokio::test]
async fn clear_empties_and_stops_disco() {
    let mut party = Party::new(seeded());
    party.add_square().await;
    party.set_disco(true).await;
    assert!(party.disco_running());
    party.clear().await;
    assert!(party.is_empty());
    assert!(!party.disco_running());
}

#[tokio::test(start_paused = true)]
async fn disco_off_restores_original_colors() {
    let mut party = Party::new(seeded());
    for _ in 0..4 {
        party.add_square().await;
    }
    let before = party.snapshot();
    let mut rx = party.subscribe();
    rx.borrow_and_update();

    party.set_disco(true).await;
    party.set_disco(true).await;
    rx.changed().await.unwrap();
    let during = party.snapshot();
    assert_ne!(during, before);
    for (a, b) in during.squares.iter().zip(&before.squares) {
        assert_eq!(a.original_color, b.original_color);
    }

    party.set_disco(false).await;
    assert!(!party.disco_running());
    assert_eq!(party.snapshot(), before);
}

#[tokio::test]
async fn offline_backend_never_blocks_local_changes() {
    let client = ApiClient::new(ClientConfig {
        base_url: "http://127.0.0.1:9".to_string(),
        timeout: Duration::from_millis(300),
    })
    .unwrap();
    let mut party = Party::with_client(seeded(), client);

    assert!(!party.load().await);
    assert!(party.client().unwrap().is_offline());

    party.add_square().await;
    party.add_square().await;
    assert_eq!(party.len(), 2);
    party.clear().await;
    assert!(party.is_empty());
}

#[test]
fn count_messages_follow_thresholds() {
    assert!(count_message(0).contains("needs some guests"));
    assert_eq!(count_message(1), "Just one square at this party so far!");
    assert!(count_message(3).contains("getting the party started"));
    assert!(count_message(6).contains("dancing in a spiral"));
    assert!(count_message(10).starts_with("Wow! 10"));
    assert!(count_message(15).contains("hopping"));
    assert!(count_message(20).contains("packed"));
    assert!(count_message(21).contains("hottest party in town"));
}

//! End-to-end scenarios across a whole console session.

use stacks_rs::baseline::{BaselineDoc, ShelvingDoc, ShipmentsSection, StaticSource};
use stacks_rs::config::Config;
use stacks_rs::core::time::FixedClock;
use stacks_rs::{
    Book, BookId, BookLine, Condition, Console, CopyId, CopyStatus, MemStore, ShelvingAction,
    ShelvingCopy, Shipment, ShipmentAction, ShipmentId, ShipmentStatus, WallClock,
};

fn book(id: &str, count: u32) -> Book {
    Book {
        id: BookId::new(id).unwrap(),
        title: format!("Title {id}"),
        author: "An Author".into(),
        genre: Some("Fiction".into()),
        isbn: Some("123".into()),
        olid: None,
        count,
        shelf_location: None,
        summary: None,
    }
}

fn copy(id: &str) -> ShelvingCopy {
    ShelvingCopy {
        copy_id: CopyId::new(id).unwrap(),
        title: format!("Copy {id}"),
        author: "An Author".into(),
        genre: None,
        isbn: Some("123".into()),
        suggested_shelf: "B-02".into(),
        status: CopyStatus::Pending,
        condition: None,
    }
}

fn source() -> StaticSource {
    StaticSource {
        catalog: BaselineDoc {
            catalog: vec![book("the-hobbit", 3), book("gatsby", 1)],
            shipments: ShipmentsSection {
                incoming: vec![Shipment {
                    shipment_id: ShipmentId::new("SH-101").unwrap(),
                    from_branch: "Central Branch".into(),
                    arrival_date: "2025-10-22".into(),
                    books: vec![BookLine {
                        id: BookId::new("the-hobbit").unwrap(),
                        quantity: 3,
                    }],
                    status: ShipmentStatus::Pending,
                }],
            },
            ..BaselineDoc::default()
        },
        shelving: ShelvingDoc {
            copies: vec![copy("c1")],
        },
    }
}

fn open(store: MemStore) -> Console<MemStore> {
    Console::open_with_clock(
        store,
        &source(),
        &Config::default(),
        Box::new(FixedClock(WallClock(0))),
    )
    .unwrap()
}

#[test]
fn shelving_scenario_damaged_copy() {
    let mut console = open(MemStore::new());

    let progress = console
        .mark_shelved("c1", Some(Condition::Damaged))
        .unwrap();
    assert_eq!(progress.done, 1);
    assert_eq!(progress.total, 1);
    assert_eq!(progress.inspection, 1);

    let log = console.shelving_log();
    assert_eq!(log.len(), 1);
    assert_eq!(log[0].action, ShelvingAction::SentForInspection);
    assert!(console.shelving_pending().is_empty());
}

#[test]
fn transfer_scenario_accept_then_review() {
    let mut console = open(MemStore::new());

    let applied = console
        .apply_shipment_action("SH-101", ShipmentAction::Accepted)
        .unwrap();
    assert_eq!(applied.shipment.status, ShipmentStatus::Accepted);

    // the report appears first in the list, awaiting review
    let reports = console.reports_awaiting_review();
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].id.as_str(), "SH-101");
    assert_eq!(reports[0].status.as_str(), "Awaiting Inventory Review");

    // resolving removes it from the review view but not from storage
    assert!(console.resolve_report("SH-101"));
    assert!(console.reports_awaiting_review().is_empty());
    assert_eq!(console.reports().len(), 1);
    assert_eq!(console.reports()[0].status.as_str(), "Resolved");

    // resolution never reaches back into the shipment or the counts
    assert_eq!(console.find_book("the-hobbit").unwrap().count, 3);
}

#[test]
fn duplicate_accept_cannot_double_report() {
    let mut console = open(MemStore::new());
    console
        .apply_shipment_action("SH-101", ShipmentAction::Accepted)
        .unwrap();
    assert!(
        console
            .apply_shipment_action("SH-101", ShipmentAction::Accepted)
            .is_err()
    );
    assert_eq!(console.reports().len(), 1);
    assert_eq!(console.transfer_log().len(), 1);
}

#[test]
fn overlay_edits_survive_reopening_the_session() {
    let mut console = open(MemStore::new());
    console.adjust_count("the-hobbit", 2).unwrap();
    console.reassign_shelf("the-hobbit", "F-12").unwrap();

    // a new session over the same store re-merges baseline + overlay
    let store = console.store().clone();
    let reopened = open(store);
    let merged = reopened.find_book("the-hobbit").unwrap();
    assert_eq!(merged.count, 5);
    assert_eq!(merged.shelf_location.as_deref(), Some("F-12"));

    // untouched records stay pure baseline
    assert_eq!(reopened.find_book("gatsby").unwrap().count, 1);
}

#[test]
fn console_opens_on_empty_baseline_and_store() {
    let console = Console::open(MemStore::new(), &StaticSource::default(), &Config::default())
        .unwrap();
    assert!(console.books().is_empty());
    assert!(console.shelving_pending().is_empty());
    // transfers fall back to the embedded seed
    assert_eq!(console.pending_shipments().len(), 2);
}

#[test]
fn full_session_walkthrough() {
    let mut console = open(MemStore::new());

    // browse + select
    let selected = console.select_book("gatsby");
    assert_eq!(selected.id.as_str(), "gatsby");

    // inventory actions
    assert_eq!(console.adjust_count("gatsby", -1000).unwrap(), 0);
    console.reassign_shelf("gatsby", "A-01").unwrap();

    // shelving
    console.mark_shelved("c1", Some(Condition::Good)).unwrap();

    // transfers
    console
        .apply_shipment_action("SH-101", ShipmentAction::Delayed)
        .unwrap();
    assert!(console.pending_shipments().is_empty());
    assert!(console.reports().is_empty());

    // everything lands in one store; a reopened session sees it all
    let reopened = open(console.store().clone());
    assert_eq!(reopened.find_book("gatsby").unwrap().count, 0);
    assert_eq!(reopened.shelving_progress().done, 1);
    assert_eq!(reopened.transfer_log().len(), 1);
    assert_eq!(reopened.shelving_log()[0].by.as_str(), "Alan (Volunteer)");
}

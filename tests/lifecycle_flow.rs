use std::sync::Barrier;
use std::thread;

use otflow::{
    Advance, BoardOptions, Correlator, Machine, MachineCategory, MemoryStore, Navigator,
    StageKey, StatusCatalog, StatusStore, StoreError, UtilizationBoard, WorkOrder,
    advance_stored, board_order,
};

#[test]
fn order_walks_to_first_cut_and_guillotine_picks_it_up() {
    let json = r#"{"ot_number":"OT-2026-001","client_name":"Editorial Andes","quantity":5000}"#;
    let mut order: WorkOrder = serde_json::from_str(json).unwrap();
    assert_eq!(
        Navigator::current_stage_info(&order.status).key,
        StageKey::PaperPurchase
    );

    for _ in 0..3 {
        order = Navigator::advance(order).into_order();
    }
    assert_eq!(order.status, "guillotine_first_cut");
    assert!(Correlator::is_serving("guillotine", &order.status));
    assert!(!Correlator::is_serving("offset_printer", &order.status));

    let machines = vec![
        Machine::new("Polar 115", MachineCategory::Guillotine),
        Machine::new("Heidelberg SM 74", MachineCategory::OffsetPrinter),
    ];
    let board = UtilizationBoard::build(
        &machines,
        std::slice::from_ref(&order),
        BoardOptions {
            include_idle_machines: false,
        },
    );
    assert_eq!(board.rows.len(), 1);
    assert_eq!(board.rows[0].machine_name, "Polar 115");
}

#[test]
fn full_walk_takes_catalog_len_minus_one_advances() {
    let mut order = WorkOrder::new("OT-9", "Acme", 1);
    let mut moves = 0;
    loop {
        match Navigator::advance(order) {
            Advance::Moved { order: next, to, .. } => {
                moves += 1;
                assert_eq!(to.stage().order, moves);
                order = next;
            }
            Advance::Unchanged { order: last, .. } => {
                order = last;
                break;
            }
        }
    }
    assert_eq!(moves, StatusCatalog::all_stages().len() - 1);
    assert_eq!(order.status, StatusCatalog::terminal_stage().key.as_str());
    assert!(!order.is_active());
}

#[test]
fn concurrent_advances_from_the_same_view_move_once() {
    let store = MemoryStore::new();
    let order = WorkOrder::new("OT-42", "Acme", 100);
    let id = order.id.clone();
    store.insert(order);

    let supervisors = 8;
    let barrier = Barrier::new(supervisors);
    let results: Vec<Result<Advance, StoreError>> = thread::scope(|scope| {
        let handles: Vec<_> = (0..supervisors)
            .map(|_| {
                scope.spawn(|| {
                    barrier.wait();
                    advance_stored(&store, &id, "paper_purchase")
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let moved = results.iter().filter(|r| matches!(r, Ok(a) if a.is_moved())).count();
    let stale = results
        .iter()
        .filter(|r| matches!(r, Err(StoreError::StaleStatus { .. })))
        .count();
    assert_eq!(moved, 1);
    assert_eq!(stale, supervisors - 1);

    let stored = store.load(&id).unwrap();
    assert_eq!(stored.status, "paper_received");
    assert_eq!(stored.status_history, vec!["paper_purchase"]);
}

#[test]
fn searched_orders_list_in_board_order_and_filter_the_board() {
    let mut andes_low = WorkOrder::new("OT-1", "Editorial Andes", 10).with_priority(1);
    andes_low.status = "offset_printing".into();
    let mut andes_high = WorkOrder::new("OT-2", "Editorial Andes", 10).with_priority(5);
    andes_high.status = "offset_printing".into();
    let mut other = WorkOrder::new("OT-3", "Imprenta Sur", 10).with_priority(9);
    other.status = "offset_printing".into();

    let mut listed: Vec<WorkOrder> = vec![andes_low, other, andes_high]
        .into_iter()
        .filter(|o| o.matches_search("andes"))
        .collect();
    board_order(&mut listed);
    let numbers: Vec<&str> = listed.iter().map(|o| o.ot_number.as_str()).collect();
    assert_eq!(numbers, vec!["OT-2", "OT-1"]);

    let machines = vec![Machine::new("Heidelberg SM 74", MachineCategory::OffsetPrinter)];
    let board = UtilizationBoard::build(&machines, &listed, BoardOptions::default());
    let row = board.serving().next().unwrap();
    let json = serde_json::to_value(row).unwrap();
    let served = json["activity"]["orders"].as_array().unwrap();
    assert_eq!(served.len(), 2);
    assert_eq!(served[0]["ot_number"], "OT-2");
}

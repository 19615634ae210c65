//! BDD-style behavioral tests for the board actor.
//!
//! Covers the occupancy protocol (place, relocate, lookup, lookup-all,
//! delete, close), the end-to-end opening scenario, and the concurrency
//! guarantees of the serialized board loop.

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use gambit_board::actors::{
    ActorError, BoardHandle, spawn_board, spawn_piece, spawn_unplaced_piece,
};
use gambit_board::legality::Permissive;
use gambit_board::{Color, Location, MoveRequest, PieceKind, Role, game, setup};

type TestResult = Result<(), Box<dyn std::error::Error>>;

/// Upper bound for anything that should complete promptly.
const PROMPT: Duration = Duration::from_secs(5);

fn at(text: &str) -> Location {
    text.parse().expect("valid square")
}

fn kind(role: Role, color: Color) -> PieceKind {
    PieceKind::new(role, color)
}

async fn setup_board() -> BoardHandle {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
    let (board, _join) = spawn_board().await.expect("Failed to spawn board");
    board
}

// ═══════════════════════════════════════════════════════════════════════════════
// PLACE / LOOKUP BEHAVIORS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn given_empty_board_when_lookup_any_square_then_absent() -> TestResult {
    let board = setup_board().await;

    for location in Location::all() {
        assert_eq!(board.lookup(location).await?, None, "{location} should be empty");
    }
    Ok(())
}

#[tokio::test]
async fn given_piece_placed_on_every_square_when_lookup_then_same_handle() -> TestResult {
    // Given: One piece on each of the 64 squares
    let board = setup_board().await;
    let mut placed = Vec::new();
    for location in Location::all() {
        let piece = spawn_piece(&board, kind(Role::Pawn, Color::Black), location).await?;
        placed.push((location, piece));
    }

    // Then: Every lookup returns the handle placed there
    for (location, piece) in placed {
        assert_eq!(board.lookup(location).await?, Some(piece));
    }
    Ok(())
}

#[tokio::test]
async fn given_occupied_square_when_place_again_then_rejected_and_occupant_kept() -> TestResult {
    // Given: Two pieces on distinct squares
    let board = setup_board().await;
    let knight = spawn_piece(&board, kind(Role::Knight, Color::White), at("B1")).await?;
    let bishop = spawn_piece(&board, kind(Role::Bishop, Color::White), at("C1")).await?;

    // When: A third piece is placed on B1
    let result = spawn_piece(&board, kind(Role::Queen, Color::Black), at("B1")).await;

    // Then: Placement is refused as a protocol violation
    match result {
        Err(err @ ActorError::Occupied(_)) => assert!(err.is_protocol_violation()),
        other => return Err(format!("expected Occupied, got {other:?}").into()),
    }

    // And: The original occupants are unaffected
    assert_eq!(board.lookup(at("B1")).await?, Some(knight.clone()));
    assert_eq!(board.lookup(at("C1")).await?, Some(bishop));
    assert_eq!(knight.kind().await?, kind(Role::Knight, Color::White));
    assert_eq!(board.pieces().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn given_occupied_square_when_place_handle_directly_then_rejected() -> TestResult {
    let board = setup_board().await;
    let rook = spawn_piece(&board, kind(Role::Rook, Color::White), at("A1")).await?;
    let intruder = spawn_unplaced_piece(&board, Arc::new(Permissive)).await?;

    let result = board.place(at("A1"), intruder).await;

    assert_eq!(result, Err(ActorError::Occupied(at("A1"))));
    assert_eq!(board.lookup(at("A1")).await?, Some(rook));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// RELOCATE BEHAVIORS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn given_empty_source_when_relocate_then_vacant_and_no_entry_created() -> TestResult {
    let board = setup_board().await;

    let result = board.relocate(at("C3"), at("C4")).await;

    assert_eq!(result, Err(ActorError::Vacant(at("C3"))));
    assert_eq!(board.lookup(at("C4")).await?, None);
    assert!(board.pieces().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_occupied_source_when_relocate_then_entry_repointed() -> TestResult {
    let board = setup_board().await;
    let queen = spawn_piece(&board, kind(Role::Queen, Color::White), at("D1")).await?;

    board.relocate(at("D1"), at("H5")).await?;

    assert_eq!(board.lookup(at("D1")).await?, None);
    assert_eq!(board.lookup(at("H5")).await?, Some(queen));
    Ok(())
}

#[tokio::test]
async fn given_occupied_destination_when_relocate_then_rejected_and_nothing_leaks() -> TestResult {
    // Given: Two pieces
    let board = setup_board().await;
    let rook = spawn_piece(&board, kind(Role::Rook, Color::White), at("A1")).await?;
    let pawn = spawn_piece(&board, kind(Role::Pawn, Color::White), at("A2")).await?;

    // When: The rook tries to move onto the pawn
    let result = rook.move_to(at("A2")).await;

    // Then: The board refuses instead of overwriting the pawn's entry
    assert_eq!(result, Err(ActorError::Occupied(at("A2"))));
    assert_eq!(board.lookup(at("A1")).await?, Some(rook.clone()));
    assert_eq!(board.lookup(at("A2")).await?, Some(pawn.clone()));
    assert_eq!(rook.location().await?, at("A1"));

    // And: Both pieces are still reachable and live
    assert_eq!(pawn.location().await?, at("A2"));
    assert_eq!(board.pieces().await?.len(), 2);
    Ok(())
}

#[tokio::test]
async fn given_piece_when_moved_onto_own_square_then_noop() -> TestResult {
    let board = setup_board().await;
    let king = spawn_piece(&board, kind(Role::King, Color::Black), at("E8")).await?;

    king.move_to(at("E8")).await?;

    assert_eq!(board.lookup(at("E8")).await?, Some(king.clone()));
    assert_eq!(king.location().await?, at("E8"));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// LOOKUP-ALL BEHAVIORS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn given_empty_board_when_lookup_all_then_stream_closes_empty() -> TestResult {
    let board = setup_board().await;

    let mut stream = board.lookup_all()?;
    let first = tokio::time::timeout(PROMPT, stream.recv()).await?;

    assert!(first.is_none());
    Ok(())
}

#[tokio::test]
async fn given_n_pieces_when_lookup_all_then_exactly_n_distinct_handles() -> TestResult {
    let board = setup_board().await;
    let placed = setup::populate(&board, Color::White).await?;

    let streamed = board.pieces().await?;

    assert_eq!(streamed.len(), placed.len());
    let ids: HashSet<_> = streamed.iter().map(|piece| piece.id()).collect();
    assert_eq!(ids.len(), streamed.len(), "no duplicates");
    let expected: HashSet<_> = placed.iter().map(|piece| piece.id()).collect();
    assert_eq!(ids, expected);
    Ok(())
}

#[tokio::test]
async fn given_reader_drops_stream_early_when_next_request_then_board_still_serves() -> TestResult
{
    let board = setup_board().await;
    setup::populate(&board, Color::Black).await?;

    // Read one handle and walk away.
    let mut stream = board.lookup_all()?;
    assert!(stream.recv().await.is_some());
    drop(stream);

    let next = tokio::time::timeout(PROMPT, board.lookup(at("E8"))).await??;
    assert!(next.is_some());
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// DELETE BEHAVIORS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn given_placed_piece_when_deleted_then_one_entry_removed_and_piece_stopped() -> TestResult {
    // Given: Three pieces
    let board = setup_board().await;
    let a = spawn_piece(&board, kind(Role::Rook, Color::Black), at("A8")).await?;
    let b = spawn_piece(&board, kind(Role::Knight, Color::Black), at("B8")).await?;
    let c = spawn_piece(&board, kind(Role::Bishop, Color::Black), at("C8")).await?;
    let before = board.pieces().await?;

    // When: The knight is deleted
    let vacated = board.delete(b.clone()).await?;

    // Then: Exactly that entry is gone
    assert_eq!(vacated, at("B8"));
    let after: HashSet<_> = board.pieces().await?.into_iter().collect();
    assert_eq!(after.len(), before.len() - 1);
    assert_eq!(after, HashSet::from([a, c]));
    assert_eq!(board.lookup(at("B8")).await?, None);

    // And: The knight no longer accepts messages
    let probe = tokio::time::timeout(PROMPT, b.location()).await?;
    assert!(matches!(probe, Err(ActorError::Unavailable(_))));
    Ok(())
}

#[tokio::test]
async fn given_moved_piece_when_deleted_then_current_square_is_cleared() -> TestResult {
    // The board asks the piece where it is rather than trusting a stale square.
    let board = setup_board().await;
    let pawn = spawn_piece(&board, kind(Role::Pawn, Color::White), at("G2")).await?;
    pawn.move_to(at("G4")).await?;

    let vacated = board.delete(pawn).await?;

    assert_eq!(vacated, at("G4"));
    assert!(board.pieces().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_unregistered_piece_when_deleted_then_rejected_and_piece_survives() -> TestResult {
    let board = setup_board().await;
    let stranger = spawn_unplaced_piece(&board, Arc::new(Permissive)).await?;
    stranger.set_location(at("D5")).await?;

    let result = board.delete(stranger.clone()).await;

    assert!(matches!(result, Err(ActorError::NotRegistered(_))));
    assert_eq!(stranger.location().await?, at("D5"));
    Ok(())
}

#[tokio::test]
async fn given_piece_deleted_twice_then_second_delete_rejected() -> TestResult {
    let board = setup_board().await;
    let pawn = spawn_piece(&board, kind(Role::Pawn, Color::White), at("F2")).await?;

    board.delete(pawn.clone()).await?;
    let again = tokio::time::timeout(PROMPT, board.delete(pawn)).await?;

    assert!(matches!(again, Err(ActorError::NotRegistered(_))));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// END-TO-END SCENARIOS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn given_white_pawn_on_d2_when_moved_to_d4_then_board_and_piece_agree() -> TestResult {
    // Given: A white pawn at grid (3, 1)
    let board = setup_board().await;
    let d2 = Location::new(3, 1)?;
    let d4 = Location::new(3, 3)?;
    let pawn = spawn_piece(&board, kind(Role::Pawn, Color::White), d2).await?;

    // When: Moving it to grid (3, 3)
    let moved = game::play(&board, MoveRequest::parse("D2", "D4")?).await?;

    // Then
    assert_eq!(moved, pawn);
    assert_eq!(board.lookup(d2).await?, None);
    assert_eq!(board.lookup(d4).await?, Some(pawn.clone()));
    assert_eq!(pawn.location().await?, d4);
    Ok(())
}

#[tokio::test]
async fn given_full_setup_when_opening_played_and_cleared_then_board_empty() -> TestResult {
    // Given: Both sides set up
    let board = setup_board().await;
    let pieces = setup::setup(&board, &[Color::White, Color::Black]).await?;
    assert_eq!(pieces.len(), 32);

    // When: The opening is played and the board cleared
    game::play(&board, MoveRequest::parse("D2", "D4")?).await?;
    let rendered = game::render(&board).await?;
    let removed = game::clear(&board).await?;

    // Then
    assert!(rendered.lines().any(|line| line == "4 . . . ♙ . . . ."));
    assert!(rendered.lines().any(|line| line == "2 ♙ ♙ ♙ . ♙ ♙ ♙ ♙"));
    assert!(rendered.lines().any(|line| line == "8 ♜ ♞ ♝ ♛ ♚ ♝ ♞ ♜"));
    assert_eq!(removed, 32);
    assert!(board.pieces().await?.is_empty());
    Ok(())
}

#[tokio::test]
async fn given_empty_source_square_when_played_then_vacant() -> TestResult {
    let board = setup_board().await;

    let result = game::play(&board, MoveRequest::parse("E2", "E4")?).await;

    assert!(matches!(result, Err(ActorError::Vacant(loc)) if loc == at("E2")));
    Ok(())
}

#[tokio::test]
async fn given_two_sides_when_populated_twice_then_second_populate_rejected() -> TestResult {
    let board = setup_board().await;
    setup::populate(&board, Color::White).await?;

    let result = setup::populate(&board, Color::White).await;

    assert!(matches!(result, Err(ActorError::Occupied(_))));
    assert_eq!(board.pieces().await?.len(), 16);
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// CLOSE BEHAVIORS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test]
async fn given_board_with_pieces_when_closed_then_reports_remaining_and_stops() -> TestResult {
    let (board, join) = spawn_board().await?;
    spawn_piece(&board, kind(Role::Pawn, Color::White), at("A2")).await?;
    spawn_piece(&board, kind(Role::Pawn, Color::White), at("B2")).await?;

    let remaining = board.close().await?;
    tokio::time::timeout(PROMPT, join).await??;

    assert_eq!(remaining, 2);
    assert!(matches!(
        board.lookup(at("A2")).await,
        Err(ActorError::Unavailable(_))
    ));
    Ok(())
}

#[tokio::test]
async fn given_closed_board_when_surviving_piece_moves_then_unavailable_until_terminated()
-> TestResult {
    // Given: A piece left on the board when it closed
    let (board, join) = spawn_board().await?;
    let pawn = spawn_piece(&board, kind(Role::Pawn, Color::Black), at("H7")).await?;
    assert_eq!(board.close().await?, 1);
    tokio::time::timeout(PROMPT, join).await??;

    // When: The piece is still alive but its board is gone
    let moved = tokio::time::timeout(PROMPT, pawn.move_to(at("H5"))).await?;

    // Then: The move fails and the piece keeps its square
    assert!(matches!(moved, Err(ActorError::Unavailable(_))));
    assert_eq!(pawn.location().await?, at("H7"));

    // And: The survivor can still be stopped explicitly
    pawn.terminate().await?;
    assert!(matches!(pawn.location().await, Err(ActorError::Unavailable(_))));
    Ok(())
}

// ═══════════════════════════════════════════════════════════════════════════════
// CONCURRENCY BEHAVIORS
// ═══════════════════════════════════════════════════════════════════════════════

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_delete_of_a_when_concurrent_ops_on_b_then_neither_blocks() -> TestResult {
    // Given: Piece A on the board, piece B about to be placed
    let board = setup_board().await;
    let a = spawn_piece(&board, kind(Role::Queen, Color::Black), at("D8")).await?;

    // When: Deleting A while placing and looking up B concurrently
    let delete_a = board.delete(a);
    let place_b = spawn_piece(&board, kind(Role::King, Color::Black), at("E8"));
    let lookup_b = board.lookup(at("E1"));

    let (deleted, placed, looked_up) = tokio::time::timeout(PROMPT, async {
        tokio::join!(delete_a, place_b, lookup_b)
    })
    .await?;

    // Then: Every operation completed
    assert_eq!(deleted?, at("D8"));
    let b = placed?;
    assert_eq!(looked_up?, None);
    assert_eq!(board.lookup(at("E8")).await?, Some(b));
    assert_eq!(board.lookup(at("D8")).await?, None);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn given_many_pieces_when_moved_concurrently_then_map_stays_consistent() -> TestResult {
    // Given: Eight white pawns on rank 2
    let board = setup_board().await;
    let mut pawns = Vec::new();
    for file in 0..Location::SIZE {
        pawns.push(
            spawn_piece(&board, kind(Role::Pawn, Color::White), Location::new(file, 1)?).await?,
        );
    }

    // When: Each pawn advances two squares from its own task
    let mut tasks = Vec::new();
    for (file, pawn) in (0..Location::SIZE).zip(pawns.clone()) {
        let to = Location::new(file, 3)?;
        tasks.push(tokio::spawn(async move { pawn.move_to(to).await }));
    }
    for task in tasks {
        tokio::time::timeout(PROMPT, task).await???;
    }

    // Then: Board and pieces agree on every square
    for (file, pawn) in (0..Location::SIZE).zip(pawns) {
        let to = Location::new(file, 3)?;
        assert_eq!(board.lookup(Location::new(file, 1)?).await?, None);
        assert_eq!(board.lookup(to).await?, Some(pawn.clone()));
        assert_eq!(pawn.location().await?, to);
    }
    Ok(())
}

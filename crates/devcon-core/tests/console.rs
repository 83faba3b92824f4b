//! End-to-end tests through the public `Console` API.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use devcon_core::{
    CommandDescriptor, ConsoleConfig, ConsoleEvent, ParamKind, ParamValue, Vec3,
};
use devcon_core::console::Console;

fn collect_log_lines(console: &Console) -> Rc<RefCell<Vec<String>>> {
    let lines = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&lines);
    console.subscribe(move |event| {
        if let ConsoleEvent::Log { text } = event {
            sink.borrow_mut().push(text.clone());
        }
    });
    lines
}

#[test]
fn bootstrap_registrations_become_invocable_after_activation() {
    let mut console = Console::default();
    let hits = Rc::new(Cell::new(0u32));

    let seen = Rc::clone(&hits);
    console.register_command(CommandDescriptor::sync("ping", "ping", move |_| {
        seen.set(seen.get() + 1);
        Ok(())
    }));

    // nothing runs before activation
    assert!(!console.try_execute_command("ping"));
    assert_eq!(hits.get(), 0);

    console.activate();
    assert!(console.try_execute_command("ping"));
    assert_eq!(hits.get(), 1);
}

#[test]
fn duplicate_name_is_rejected_and_first_registrant_wins() {
    let mut console = Console::default();
    console.activate();

    let winner = Rc::new(Cell::new(false));
    let loser = Rc::new(Cell::new(false));

    let seen = Rc::clone(&winner);
    console
        .try_register_command(CommandDescriptor::sync("reset", "reset_scene", move |_| {
            seen.set(true);
            Ok(())
        }))
        .unwrap();

    let seen = Rc::clone(&loser);
    let result = console.try_register_command(CommandDescriptor::sync(
        "reset",
        "reset_player",
        move |_| {
            seen.set(true);
            Ok(())
        },
    ));
    assert!(result.is_err());

    assert!(console.try_execute_command("reset"));
    assert!(winner.get());
    assert!(!loser.get());
}

#[test]
fn remove_then_reregister_restores_invocability() {
    let mut console = Console::default();
    console.activate();

    console.register_command(CommandDescriptor::sync("ping", "ping", |_| Ok(())));
    assert!(console.try_execute_command("ping"));

    console.remove_command("ping", false, false);
    assert!(!console.try_execute_command("ping"));

    console.register_command(CommandDescriptor::sync("ping", "ping", |_| Ok(())));
    assert!(console.try_execute_command("ping"));
}

#[test]
fn compound_input_executes_both_commands() {
    let mut console = Console::default();
    let calls = Rc::new(RefCell::new(Vec::new()));

    let sink = Rc::clone(&calls);
    console.register_command(
        CommandDescriptor::sync("cmd1", "cmd1", move |values| {
            sink.borrow_mut().push(format!(
                "cmd1 {:?} {:?}",
                values[0].as_ref().and_then(ParamValue::as_i32),
                values[1].as_ref().and_then(ParamValue::as_i32),
            ));
            Ok(())
        })
        .with_params([ParamKind::Int32, ParamKind::Int32]),
    );

    let sink = Rc::clone(&calls);
    console.register_command(
        CommandDescriptor::sync("cmd2", "cmd2", move |values| {
            sink.borrow_mut().push(format!(
                "cmd2 {:?}",
                values[0].as_ref().and_then(ParamValue::as_i32)
            ));
            Ok(())
        })
        .with_params([ParamKind::Int32]),
    );
    console.activate();

    // overall result equals the success of the last fragment
    assert!(console.try_execute_command("cmd1 1,2 & cmd2 3"));
    assert_eq!(
        *calls.borrow(),
        ["cmd1 Some(1) Some(2)", "cmd2 Some(3)"]
    );
}

#[test]
fn float_suffix_and_aggregate_coercion() {
    let mut console = Console::default();
    let fov = Rc::new(Cell::new(0.0f32));
    let position = Rc::new(Cell::new(Vec3::default()));

    let seen = Rc::clone(&fov);
    console.register_command(
        CommandDescriptor::sync("fov", "set_fov", move |values| {
            seen.set(values[0].as_ref().and_then(ParamValue::as_f32).unwrap());
            Ok(())
        })
        .with_params([ParamKind::Float32]),
    );

    let seen = Rc::clone(&position);
    console.register_command(
        CommandDescriptor::sync("teleport", "teleport", move |values| {
            seen.set(values[0].as_ref().and_then(ParamValue::as_vec3).unwrap());
            Ok(())
        })
        .with_params([ParamKind::Vector3]),
    );
    console.activate();

    assert!(console.try_execute_command("fov 1.5f"));
    assert_eq!(fov.get(), 1.5);

    assert!(console.try_execute_command("teleport 1,2,3"));
    assert_eq!(position.get(), Vec3::new(1.0, 2.0, 3.0));

    // two components against a three-component aggregate is no match
    assert!(!console.try_execute_command("teleport 1,2"));
}

#[test]
fn unknown_command_reported_exactly_once() {
    let mut console = Console::default();
    console.activate();
    let lines = collect_log_lines(&console);

    assert!(!console.try_execute_command("doesnotexist"));
    assert_eq!(console.failed_command_count(), 1);
    assert_eq!(
        *lines.borrow(),
        ["Command 'doesnotexist' was not recognized."]
    );
}

#[test]
fn history_deduplicates_and_keeps_recency_order() {
    let mut console = Console::default();
    console.register_command(CommandDescriptor::sync("help", "help", |_| Ok(())));
    console.register_command(CommandDescriptor::sync("clear", "clear", |_| Ok(())));
    console.activate();

    console.try_execute_command("help");
    console.try_execute_command("clear");
    console.try_execute_command("help");

    assert_eq!(console.history(), ["clear", "help"]);
}

#[test]
fn history_keeps_duplicates_when_tracking_enabled() {
    let config = ConsoleConfig::default().with_track_duplicates(true);
    let mut console = Console::new(config);
    console.register_command(CommandDescriptor::sync("help", "help", |_| Ok(())));
    console.activate();

    console.try_execute_command("help");
    console.try_execute_command("help");
    assert_eq!(console.history(), ["help", "help"]);
}

#[test]
fn case_insensitive_input_matches_same_descriptor() {
    let mut console = Console::default();
    let hits = Rc::new(Cell::new(0u32));

    let seen = Rc::clone(&hits);
    console.register_command(CommandDescriptor::sync("help", "help", move |_| {
        seen.set(seen.get() + 1);
        Ok(())
    }));
    console.activate();

    assert!(console.try_execute_command("HELP"));
    assert!(console.try_execute_command("help"));
    assert_eq!(hits.get(), 2);
}

#[test]
fn stale_instance_command_purges_lazily() {
    struct Camera;

    let mut console = Console::default();
    let camera = Rc::new(Camera);
    console.register_command(
        CommandDescriptor::sync("shake", "shake", |_| Ok(())).for_instance(&camera),
    );
    console.activate();
    assert_eq!(console.command_count(), 1);

    drop(camera);
    // still listed until the next match attempt
    assert_eq!(console.command_count(), 1);

    assert!(!console.try_execute_command("shake"));
    assert_eq!(console.command_count(), 0);
    assert_eq!(console.executed_command_count(), 0);
}

#[test]
fn listing_snapshots_reflect_metadata() {
    let console = Console::default();
    console.register_command(
        CommandDescriptor::sync("fov", "set_fov", |_| Ok(()))
            .with_params([ParamKind::Float32])
            .with_default_value("60")
            .with_info("set the camera field of view"),
    );
    console.register_command(CommandDescriptor::sync("quit", "quit", |_| Ok(())).hidden());
    console.activate();

    assert_eq!(console.command_names(), ["fov"]);
    assert_eq!(console.command_names_with_defaults(), ["fov 60"]);
    assert_eq!(
        console.command_names_with_infos(),
        ["fov - set the camera field of view"]
    );
}

#[test]
fn reset_clears_commands_counters_and_history() {
    let mut console = Console::default();
    console.register_command(CommandDescriptor::sync("ping", "ping", |_| Ok(())));
    console.activate();
    console.try_execute_command("ping");
    console.try_execute_command("missing");

    console.reset();
    assert_eq!(console.command_count(), 0);
    assert_eq!(console.executed_command_count(), 0);
    assert_eq!(console.failed_command_count(), 0);
    assert!(console.history().is_empty());
}

#[test]
fn execution_finished_event_fires_per_call() {
    let mut console = Console::default();
    console.register_command(CommandDescriptor::sync("ping", "ping", |_| Ok(())));
    console.activate();

    let finishes = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&finishes);
    console.subscribe(move |event| {
        if let ConsoleEvent::ExecutionFinished { success } = event {
            sink.borrow_mut().push(*success);
        }
    });

    console.try_execute_command("ping");
    console.try_execute_command("missing");
    assert_eq!(*finishes.borrow(), [true, false]);
}

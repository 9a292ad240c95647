//! Drives the selection loop with scripted input and inspects the plain-text output.

use std::{
    io::Cursor,
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use consolenav::{
    theme::Theme, Action, EofPolicy, ExitReason, Menu, MenuItem, Navigator, Outcome, Renderer,
};

fn run(menu: &mut Menu, input: &str, eof: EofPolicy) -> (Outcome, String) {
    run_bytes(menu, input.as_bytes(), eof)
}

fn run_bytes(menu: &mut Menu, input: &[u8], eof: EofPolicy) -> (Outcome, String) {
    let renderer = Arc::new(Renderer::new(Vec::new(), Theme::default(), false));
    let mut nav = Navigator::new(Cursor::new(input.to_vec()), Arc::clone(&renderer))
        .with_eof_policy(eof);
    let outcome = nav.run_menu(menu).unwrap();
    drop(nav);

    let renderer = Arc::try_unwrap(renderer).ok().unwrap();
    (outcome, String::from_utf8(renderer.into_inner()).unwrap())
}

fn sample() -> Menu {
    Menu::new("Main").with_items([
        MenuItem::new("A").with_key("1"),
        MenuItem::new("B").with_key("2"),
    ])
}

#[test]
fn draws_title_exit_item_first_then_items() {
    let mut menu = sample();
    let (outcome, out) = run(&mut menu, "0\n", EofPolicy::Invalid);

    assert_eq!(outcome.reason, ExitReason::ExitItem);
    assert_eq!(
        out,
        "\nMain\n----\n0) Quit\n1) A\n2) B\n\nMain> Selected: Quit\n\n"
    );
}

#[test]
fn selections_redraw_until_exit() {
    let mut menu = sample();
    let (outcome, out) = run(&mut menu, "1\n2\n0\n", EofPolicy::Invalid);

    assert_eq!(
        outcome,
        Outcome {
            selections: 3,
            reason: ExitReason::ExitItem
        }
    );
    assert!(out.contains("Selected: A\n"));
    assert!(out.contains("Selected: B\n"));
    assert_eq!(out.matches("0) Quit").count(), 3);
    assert!(!out.contains("Invalid menu option."));
}

#[test]
fn unknown_and_empty_input_report_invalid_and_redraw() {
    let mut menu = sample();
    let (outcome, out) = run(&mut menu, "9\n\n0\n", EofPolicy::Invalid);

    assert_eq!(outcome.selections, 1);
    assert_eq!(out.matches("Invalid menu option.\n\n").count(), 2);
    assert_eq!(out.matches("Main\n----\n").count(), 3);
}

#[test]
fn undecodable_input_is_an_invalid_selection() {
    let mut menu = sample();
    let (outcome, out) = run_bytes(&mut menu, b"\xff\xfe\n0\n", EofPolicy::Invalid);

    assert_eq!(
        outcome,
        Outcome {
            selections: 1,
            reason: ExitReason::ExitItem
        }
    );
    assert_eq!(out.matches("Invalid menu option.").count(), 1);
    assert!(out.ends_with("Selected: Quit\n\n"));
}

#[test]
fn matching_ignores_case_and_surrounding_whitespace() {
    let mut menu = Menu::new("Main")
        .with_items([MenuItem::new("A").with_key("1")])
        .with_exit_item(MenuItem::new("Leave").with_key("Q"));
    let (outcome, out) = run(&mut menu, " 1 \n\tq\n", EofPolicy::Invalid);

    assert_eq!(outcome.reason, ExitReason::ExitItem);
    assert!(out.contains("Selected: A\n"));
    assert!(out.contains("Selected: Leave\n"));
    assert!(out.contains("Q) Leave\n"));
}

#[test]
fn blank_keys_default_to_display_position() {
    let mut menu = Menu::new("Main").with_items([
        MenuItem::new("first"),
        MenuItem::new("second"),
        MenuItem::new("third"),
    ]);
    let (_, out) = run(&mut menu, "3\n0\n", EofPolicy::Invalid);

    assert!(out.contains("0) Quit\n1) first\n2) second\n3) third\n"));
    assert!(out.contains("Selected: third\n"));
    assert_eq!(menu.items[2].key(), Some("3"));
}

#[test]
fn empty_menu_still_renders_and_exits() {
    let mut menu = Menu::new("Nothing");
    let (outcome, out) = run(&mut menu, "0\n", EofPolicy::Invalid);

    assert_eq!(outcome.reason, ExitReason::ExitItem);
    assert!(out.starts_with("\nNothing\n-------\n0) Quit\n\nNothing> "));
}

#[test]
fn actions_see_the_chosen_item_and_can_change_the_menu() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_by_action = Arc::clone(&seen);
    let mut menu = Menu::new("Main").with_items([MenuItem::new("Grow")
        .with_key("g")
        .on_select(move |menu, item| {
            seen_by_action.lock().unwrap().push(item.label.clone());
            let n = menu.items.len();
            menu.push(MenuItem::new(format!("Added {n}")));
            menu.items[0].label = "Grow more".to_string();
        })]);

    let (_, out) = run(&mut menu, "g\ng\n0\n", EofPolicy::Invalid);

    assert_eq!(*seen.lock().unwrap(), ["Grow", "Grow more"]);
    assert_eq!(menu.items.len(), 3);
    // second render shows the first change, third render shows both
    assert!(out.contains("0) Quit\ng) Grow more\n2) Added 1\n\n"));
    assert!(out.contains("0) Quit\ng) Grow more\n2) Added 1\n3) Added 2\n\n"));
}

#[test]
fn item_sharing_the_exit_key_shadows_exit() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let mut menu = Menu::new("Main").with_items([MenuItem::new("Zero")
        .with_key("0")
        .on_select(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        })]);

    let (outcome, out) = run(&mut menu, "0\n0\n", EofPolicy::Exit);

    assert_eq!(hits.load(Ordering::SeqCst), 2);
    assert_eq!(outcome.reason, ExitReason::EndOfInput);
    assert!(out.contains("0) Quit\n0) Zero\n"));
    assert!(!out.contains("Selected: Quit"));
}

#[test]
fn exit_item_action_runs_before_leaving() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&hits);
    let mut menu = sample().with_exit_item(MenuItem::new("Quit").on_select(move |_, _| {
        counter.fetch_add(1, Ordering::SeqCst);
    }));

    let (outcome, _) = run(&mut menu, "0\n", EofPolicy::Invalid);

    assert_eq!(outcome.reason, ExitReason::ExitItem);
    assert_eq!(hits.load(Ordering::SeqCst), 1);
}

#[test]
fn end_of_input_can_leave_the_menu() {
    let mut menu = sample();
    let (outcome, out) = run(&mut menu, "1\n", EofPolicy::Exit);

    assert_eq!(
        outcome,
        Outcome {
            selections: 1,
            reason: ExitReason::EndOfInput
        }
    );
    assert!(!out.contains("Invalid menu option."));
}

#[test]
fn submenus_return_to_their_parent() {
    let tools = Menu::new("Tools")
        .with_exit_item(MenuItem::new("Back"))
        .with_items([MenuItem::new("Hammer")]);
    let mut menu = Menu::new("Main").with_items([MenuItem::new("Tools").with_key("t").submenu(tools)]);

    let (outcome, out) = run(&mut menu, "t\n1\n0\n0\n", EofPolicy::Invalid);

    assert_eq!(
        outcome,
        Outcome {
            selections: 4,
            reason: ExitReason::ExitItem
        }
    );
    let order = [
        "Selected: Tools",
        "Tools\n-----\n0) Back\n1) Hammer\n",
        "Selected: Hammer",
        "Selected: Back",
        "Main> Selected: Quit",
    ];
    let mut from = 0;
    for needle in order {
        let at = out[from..].find(needle).unwrap_or_else(|| panic!("missing {needle:?}"));
        from += at + needle.len();
    }
}

#[test]
fn end_of_input_inside_a_submenu_stops_every_level() {
    let tools = Menu::new("Tools").with_items([MenuItem::new("Hammer")]);
    let mut menu = Menu::new("Main").with_items([MenuItem::new("Tools").submenu(tools)]);

    let (outcome, _) = run(&mut menu, "1\n1\n", EofPolicy::Exit);

    assert_eq!(outcome.reason, ExitReason::EndOfInput);
    assert_eq!(outcome.selections, 2);
    assert!(matches!(menu.items[0].action, Action::Submenu(_)));
}

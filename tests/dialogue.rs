use bevy_ecs::system::RunSystemOnce;
use dreamwalk::constants::dialogue::DURATION;
use dreamwalk::systems::{dialogue_system, DeltaTime, DialogueBox};
use speculoos::prelude::*;

mod common;

#[test]
fn test_line_stays_for_full_duration() {
    let mut dialogue = DialogueBox::default();
    assert_that(&dialogue.text()).is_none();

    dialogue.show("Hello");
    assert_that(&dialogue.text()).is_equal_to(Some("Hello"));

    dialogue.tick(DURATION - 0.1);
    assert_that(&dialogue.text()).is_equal_to(Some("Hello"));
}

#[test]
fn test_line_hides_after_duration() {
    let mut dialogue = DialogueBox::default();
    dialogue.show("Hello");

    dialogue.tick(1.0);
    assert_that(&dialogue.text()).is_equal_to(Some("Hello"));

    dialogue.tick(DURATION);
    assert_that(&dialogue.text()).is_none();
}

#[test]
fn test_new_line_restarts_timer() {
    let mut dialogue = DialogueBox::default();
    dialogue.show("First");
    dialogue.tick(2.0);

    dialogue.show("Second");
    dialogue.tick(2.0);

    // The first line's deadline has passed, but the second line is still fresh
    assert_that(&dialogue.text()).is_equal_to(Some("Second"));
}

#[test]
fn test_dialogue_system_uses_delta_time() {
    let mut world = common::create_test_world();
    world.resource_mut::<DialogueBox>().show("Hello");
    world.insert_resource(DeltaTime { seconds: DURATION + 0.1 });

    world.run_system_once(dialogue_system).expect("System should run successfully");

    assert_that(&world.resource::<DialogueBox>().text()).is_none();
}

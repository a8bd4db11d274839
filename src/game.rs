//! This module contains the main game logic and state.

use bevy_ecs::event::{Event, EventRegistry, Events};
use bevy_ecs::schedule::{IntoScheduleConfigs, Schedule, SystemSet};
use bevy_ecs::system::Res;
use bevy_ecs::world::World;
use sdl2::event::EventType;
use sdl2::mouse::MouseUtil;
use sdl2::render::Canvas;
use sdl2::video::Window;
use sdl2::EventPump;
use tracing::{debug, info};

use crate::error::{GameError, GameResult};
use crate::events::{GameCommand, GameEvent, InteractionEvent};
use crate::scene::projection::Camera;
use crate::systems::{
    boss_drift_system, dialogue_system, error_report_system, handle_pause_command, hud_render_system, input_system,
    interaction_system, picking_system, player_control_system, player_look_system, player_movement_system,
    pointer_capture_system, present_system, render_system, run_timer_system, stage_system, Bindings, DeltaTime,
    DialogueBox, FragmentCount, GameMode, GameStage, GlobalState, HeldKeys, LeaderboardResource, LookDelta, PauseState,
    PointerLock, RunSummary, RunTimer, ScoreStore,
};

#[cfg(not(target_os = "emscripten"))]
use crate::systems::fullscreen_system;

/// System set for all gameplay systems to ensure they run after input processing
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum GameplaySet {
    /// Gameplay systems that process inputs
    Input,
    /// Gameplay systems that update the run; skipped outside a run and while paused
    Update,
    /// Gameplay systems that respond to events
    Respond,
}

/// System set for all rendering systems to ensure they run after gameplay logic
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum RenderSet {
    Draw,
    Present,
}

/// Core game state manager built on the Bevy ECS architecture.
///
/// The `World` holds the scene entities and every resource, and the `Schedule` runs one frame.
/// SDL2 handles are stored as `NonSend` resources.
pub struct Game {
    pub world: World,
    pub schedule: Schedule,
}

impl Game {
    /// Builds the world and schedule. Nothing is spawned until a mode is selected.
    ///
    /// With `start_mode` set, the first frame starts a run in that mode and skips mode select.
    pub fn new(
        canvas: Canvas<Window>,
        mut event_pump: EventPump,
        mouse: MouseUtil,
        store: Box<dyn ScoreStore>,
        start_mode: Option<GameMode>,
    ) -> GameResult<Game> {
        info!("Starting game initialization");

        debug!("Disabling unnecessary SDL events");
        Self::disable_sdl_events(&mut event_pump);

        let mut world = World::default();
        let mut schedule = Schedule::default();

        register_events(&mut world);
        insert_resources(&mut world, store);

        world.insert_non_send_resource(canvas);
        world.insert_non_send_resource(event_pump);
        world.insert_non_send_resource(mouse);

        debug!("Configuring system execution schedule");
        configure_schedule(&mut schedule);

        if let Some(mode) = start_mode {
            info!(%mode, "Skipping mode select");
            world.send_event(GameEvent::from(GameCommand::SelectMode(mode)));
        }

        info!("Game initialization completed successfully");
        Ok(Game { world, schedule })
    }

    fn disable_sdl_events(event_pump: &mut EventPump) {
        for event_type in [
            EventType::JoyAxisMotion,
            EventType::JoyBallMotion,
            EventType::JoyHatMotion,
            EventType::JoyButtonDown,
            EventType::JoyButtonUp,
            EventType::ControllerAxisMotion,
            EventType::ControllerButtonDown,
            EventType::ControllerButtonUp,
            EventType::FingerDown,
            EventType::FingerUp,
            EventType::FingerMotion,
            EventType::DollarGesture,
            EventType::MultiGesture,
            EventType::DropFile,
            EventType::DropText,
            EventType::TextInput,
            EventType::TextEditing,
            EventType::MouseWheel,
        ] {
            event_pump.disable_event(event_type);
        }
    }

    /// Runs one frame.
    ///
    /// Returns `true` if the game should terminate.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.world.insert_resource(DeltaTime { seconds: dt });
        self.schedule.run(&mut self.world);
        update_events(&mut self.world);

        self.world.get_resource::<GlobalState>().is_some_and(|state| state.exit)
    }
}

pub fn register_events(world: &mut World) {
    EventRegistry::register_event::<GameError>(world);
    EventRegistry::register_event::<GameEvent>(world);
    EventRegistry::register_event::<InteractionEvent>(world);
}

/// Inserts every resource a frame needs, apart from the SDL handles.
pub fn insert_resources(world: &mut World, store: Box<dyn ScoreStore>) {
    world.insert_resource(GlobalState { exit: false });
    world.insert_resource(DeltaTime { seconds: 0.0 });
    world.insert_resource(Bindings::default());
    world.insert_resource(HeldKeys::default());
    world.insert_resource(LookDelta::default());
    world.insert_resource(PointerLock::default());
    world.insert_resource(Camera::default());
    world.insert_resource(GameStage::default());
    world.insert_resource(PauseState::default());
    world.insert_resource(FragmentCount::default());
    world.insert_resource(DialogueBox::default());
    world.insert_resource(RunTimer::default());
    world.insert_resource(RunSummary::default());
    world.insert_resource(LeaderboardResource::load(store));
}

/// Swaps the double buffers of every registered event type.
pub fn update_events(world: &mut World) {
    fn update<T: Event>(world: &mut World) {
        if let Some(mut events) = world.get_resource_mut::<Events<T>>() {
            events.update();
        }
    }

    update::<GameError>(world);
    update::<GameEvent>(world);
    update::<InteractionEvent>(world);
}

/// Run condition for [`GameplaySet::Update`]: a run is in progress and not paused.
pub fn gameplay_active(stage: Res<GameStage>, paused: Res<PauseState>) -> bool {
    stage.is_playing() && !paused.active()
}

fn configure_schedule(schedule: &mut Schedule) {
    // Input systems always run so the SDL event pump never stalls
    let input_systems = (
        input_system,
        player_control_system,
        handle_pause_command,
        #[cfg(not(target_os = "emscripten"))]
        fullscreen_system,
        pointer_capture_system,
        player_look_system,
    )
        .chain();

    let update_systems = (
        player_movement_system,
        boss_drift_system,
        picking_system,
        interaction_system,
        dialogue_system,
        run_timer_system,
    )
        .chain();

    schedule
        .add_systems((
            input_systems.in_set(GameplaySet::Input),
            update_systems.in_set(GameplaySet::Update),
            (stage_system, error_report_system).chain().in_set(GameplaySet::Respond),
            (render_system, hud_render_system).chain().in_set(RenderSet::Draw),
            present_system.in_set(RenderSet::Present),
        ))
        .configure_sets(
            (
                GameplaySet::Input,
                GameplaySet::Update.run_if(gameplay_active),
                GameplaySet::Respond,
                RenderSet::Draw,
                RenderSet::Present,
            )
                .chain(),
        );
}

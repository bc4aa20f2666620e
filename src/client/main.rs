use bevy::prelude::*;

use platformer::GameConfig;
use platformer::GameEvent;
use platformer::GameMode;
use platformer::GameView;

mod camera;
mod draw;
mod hud;
mod level;
mod player;

const DEFAULT_CONFIG_PATH: &str = "assets/config.json5";
const BACKGROUND_COLOR: Color = Color::srgb(100. / 255., 149. / 255., 237. / 255.);

#[derive(Resource)]
pub struct ActiveGame(pub GameView);

#[derive(Resource)]
pub struct GameEvents(pub flume::Receiver<GameEvent>);

// Game events re-emitted for bevy systems
#[derive(Event, Debug)]
pub struct GameEventMessage(pub GameEvent);

fn main() -> anyhow::Result<()> {
    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let mut app = App::new();
    // the window needs the config, so it is read before logging is set up
    let config = GameConfig::load_or_default(&config_path)?;
    app.add_plugins(
        DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: config.screen.title.clone(),
                    resolution: (config.screen.width as f32, config.screen.height as f32).into(),
                    resizable: false,
                    ..default()
                }),
                ..default()
            })
            .set(ImagePlugin::default_nearest()),
    );
    if !std::path::Path::new(&config_path).exists() {
        warn!("no config at {config_path}, using defaults");
    }

    let mut view = GameView::new(config.clone());
    let game_events = view.subscribe();
    view.on_enter()?;

    app.insert_resource(ClearColor(BACKGROUND_COLOR))
        .insert_resource(Time::<Fixed>::from_seconds(config.step_len_s()))
        .insert_resource(ActiveGame(view))
        .insert_resource(GameEvents(game_events))
        .add_event::<GameEventMessage>()
        .add_plugins(draw::DrawPlugin)
        .add_plugins(level::LevelPlugin)
        .add_plugins(player::PlayerPlugin)
        .add_plugins(camera::ViewportCameraPlugin)
        .add_plugins(hud::HudPlugin)
        .add_systems(FixedUpdate, step_game)
        .add_systems(PreUpdate, forward_game_events)
        .add_systems(Last, exit_game);
    app.run();
    Ok(())
}

fn step_game(mut active_game: ResMut<ActiveGame>, time: Res<Time>) {
    if let Err(e) = active_game.0.on_frame(time.delta_secs()) {
        error!("frame failed: {e:#}");
    }
}

fn forward_game_events(
    game_events: Res<GameEvents>,
    mut event_writer: EventWriter<GameEventMessage>,
) {
    for event in game_events.0.drain() {
        match &event {
            GameEvent::LevelLoaded { name, collectables } => {
                info!("level {name} ready, {collectables} to collect")
            }
            GameEvent::CoinCollected { score, .. } => debug!("score {score}"),
            GameEvent::Respawned { position } => info!("respawned at {position}"),
            GameEvent::Jumped => {}
        }
        event_writer.write(GameEventMessage(event));
    }
}

fn exit_game(mut exit_events: EventReader<AppExit>, mut active_game: ResMut<ActiveGame>) {
    if exit_events.read().next().is_some() {
        active_game.0.on_exit();
    }
}

//! Space Race Viewer - Bevy window showing mission flight paths
//!
//! Keys: Left/Right pick the mission, +/- change the path resolution,
//! Tab switches side, R redraws. Click a bubble to identify it.

use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::{Extent3d, TextureDimension, TextureFormat};
use bevy::window::PrimaryWindow;
use spacerace_logic::config::RenderConfig;
use spacerace_logic::constants::{colors, screen};
use spacerace_logic::data::MissionSteps;
use spacerace_logic::player::Player;
use spacerace_logic::renderer::{MissionPathRenderer, MissionRegistrar, MissionRegistration};
use spacerace_logic::starfield::draw_starfield;
use spacerace_logic::surface::{LegacySurface, Palette};

const CONFIG_PATH: &str = "data/render_config.json";
const SCALE: f32 = 3.0;

fn main() {
    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Space Race - Mission Flight Paths".to_string(),
                        resolution: (1000.0, 680.0).into(),
                        present_mode: bevy::window::PresentMode::AutoVsync,
                        ..default()
                    }),
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        )
        .insert_resource(PathView::load())
        .add_systems(Startup, setup)
        .add_systems(
            Update,
            (mission_controls, handle_click, redraw_path, update_status_text).chain(),
        )
        .run();
}

/// Everything the viewer keeps between frames.
#[derive(Resource)]
struct PathView {
    config: RenderConfig,
    steps: MissionSteps,
    codes: Vec<u8>,
    current: usize,
    renderer: MissionPathRenderer,
    screen: LegacySurface,
    palette: Palette,
    last_mission: LastMission,
    dirty: bool,
    status: String,
}

impl PathView {
    fn load() -> Self {
        let config = match RenderConfig::load(std::path::Path::new(CONFIG_PATH)) {
            Ok(c) => c,
            Err(e) => {
                warn!("Using default config ({}: {})", CONFIG_PATH, e);
                RenderConfig::default()
            }
        };
        for err in config.validate() {
            warn!("Config: {}", err);
        }

        let steps = match MissionSteps::load(&config.data_paths()) {
            Ok(s) => s,
            Err(e) => {
                error!("No mission data: {}", e);
                MissionSteps::default()
            }
        };
        Self::new(config, steps)
    }

    fn new(config: RenderConfig, steps: MissionSteps) -> Self {
        let codes = steps.codes();
        let current = codes
            .iter()
            .position(|&c| c == config.default_mission)
            .unwrap_or(0);

        Self {
            renderer: config.to_renderer(),
            config,
            steps,
            codes,
            current,
            screen: LegacySurface::new(),
            palette: Palette::legacy(),
            last_mission: LastMission::default(),
            dirty: true,
            status: String::new(),
        }
    }

    fn current_code(&self) -> Option<u8> {
        self.codes.get(self.current).copied()
    }

    fn redraw(&mut self) {
        self.screen.clear(colors::BACKGROUND);
        draw_starfield(
            &mut self.screen,
            self.config.starfield_seed,
            self.config.star_count,
        );

        let Some(code) = self.current_code() else {
            self.status = "No missions loaded".to_string();
            return;
        };

        self.status = match self.renderer.render_mission_path(
            self.config.player,
            code,
            self.config.pad,
            &self.steps,
            &mut self.screen,
            &mut self.last_mission,
        ) {
            Ok(n) => match self.last_mission.0 {
                Some(m) => format!(
                    "{:?} mission {:02}  pad {}  SEG {}  {} bubbles",
                    m.player,
                    m.code,
                    m.pad,
                    self.renderer.resolution().get(),
                    n
                ),
                None => format!("Mission {:02}: {} bubbles", code, n),
            },
            Err(e) => {
                warn!("Mission {:02}: {}", code, e);
                format!("Mission {:02}: {}", code, e)
            }
        };
    }
}

/// Keeps only the mission the screen currently shows.
#[derive(Debug, Default)]
struct LastMission(Option<MissionRegistration>);

impl MissionRegistrar for LastMission {
    fn register_mission(&mut self, player: Player, code: u8, pad: u8) {
        self.0 = Some(MissionRegistration { player, code, pad });
    }
}

#[derive(Resource)]
struct ScreenImage(Handle<Image>);

#[derive(Component)]
struct StatusText;

fn setup(mut commands: Commands, mut images: ResMut<Assets<Image>>) {
    commands.spawn(Camera2d::default());

    let image = Image::new_fill(
        Extent3d {
            width: screen::WIDTH as u32,
            height: screen::HEIGHT as u32,
            depth_or_array_layers: 1,
        },
        TextureDimension::D2,
        &[0, 0, 0, 255],
        TextureFormat::Rgba8UnormSrgb,
        RenderAssetUsages::MAIN_WORLD | RenderAssetUsages::RENDER_WORLD,
    );
    let handle = images.add(image);

    commands.spawn((
        Sprite::from_image(handle.clone()),
        Transform::from_scale(Vec3::splat(SCALE)),
    ));
    commands.insert_resource(ScreenImage(handle));

    commands.spawn((
        Text2d::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Transform::from_xyz(0.0, screen::HEIGHT as f32 * SCALE / 2.0 + 20.0, 1.0),
        StatusText,
    ));
}

fn mission_controls(keyboard: Res<ButtonInput<KeyCode>>, mut view: ResMut<PathView>) {
    let count = view.codes.len();
    if count == 0 {
        return;
    }

    if keyboard.just_pressed(KeyCode::ArrowRight) {
        view.current = (view.current + 1) % count;
        view.dirty = true;
    }
    if keyboard.just_pressed(KeyCode::ArrowLeft) {
        view.current = (view.current + count - 1) % count;
        view.dirty = true;
    }
    if keyboard.just_pressed(KeyCode::Equal) || keyboard.just_pressed(KeyCode::NumpadAdd) {
        view.renderer.increase_path_resolution();
        view.dirty = true;
    }
    if keyboard.just_pressed(KeyCode::Minus) || keyboard.just_pressed(KeyCode::NumpadSubtract) {
        view.renderer.decrease_path_resolution();
        view.dirty = true;
    }
    if keyboard.just_pressed(KeyCode::Tab) {
        view.config.player = view.config.player.opponent();
        view.dirty = true;
    }
    if keyboard.just_pressed(KeyCode::KeyR) {
        view.dirty = true;
    }
}

fn handle_click(
    view: Res<PathView>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mouse: Res<ButtonInput<MouseButton>>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }

    let Ok(window) = window_query.get_single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.get_single() else {
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    // Sprite is centred on the origin; legacy y grows downwards
    let x = (world_pos.x / SCALE + screen::WIDTH as f32 / 2.0).floor() as i32;
    let y = (screen::HEIGHT as f32 / 2.0 - world_pos.y / SCALE).floor() as i32;

    match view.renderer.hit_test_bubble(x, y) {
        Some(i) => {
            let bubble = view.renderer.bubbles()[i];
            info!("Bubble {} at ({}, {})", bubble.label(), bubble.x, bubble.y);
        }
        None => debug!("No bubble at ({}, {})", x, y),
    }
}

fn redraw_path(
    mut view: ResMut<PathView>,
    screen_image: Res<ScreenImage>,
    mut images: ResMut<Assets<Image>>,
) {
    if !view.dirty {
        return;
    }
    view.dirty = false;
    view.redraw();

    if let Some(image) = images.get_mut(&screen_image.0) {
        image.data = view.screen.to_rgba(&view.palette);
    }
}

fn update_status_text(view: Res<PathView>, mut query: Query<&mut Text2d, With<StatusText>>) {
    if !view.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = view.status.clone();
    }
}

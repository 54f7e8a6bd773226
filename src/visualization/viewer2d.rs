use bevy::log::LogPlugin;
use bevy::math::primitives::Circle;
use bevy::prelude::*;
use bevy::sprite::{MaterialMesh2dBundle, Mesh2dHandle};
use bevy::window::WindowResolution;

use crate::simulation::trajectory::Trajectory;
use super::frames::{window_half_width, FramePlan};

#[derive(Component)]
struct BodyIndex(pub usize);

/// Finished trajectory plus the frame currently on screen
#[derive(Resource)]
struct Playback {
    trajectory: Trajectory,
    plan: FramePlan,
    frame: usize,
    scale: f32, // pixels per AU
}

const PIXELS_PER_INCH: f32 = 100.0;
const BODY_RADIUS: f32 = 4.0; // pixels

/// Replay a finished trajectory in a square window `figure_size` inches wide
pub fn run_2d(trajectory: Trajectory, plan: FramePlan, figure_size: f64, title: &str) {
    let side = figure_size as f32 * PIXELS_PER_INCH;
    let half_width = window_half_width(trajectory.max_extent());
    let scale = 0.5 * side / half_width as f32;

    log::info!(
        "Replaying {} bodies: window [-{half_width:.3}, {half_width:.3}] AU, {:.1} FPS, {} frames",
        trajectory.names.len(),
        plan.fps,
        plan.n_frames
    );

    let window = Window {
        title: title.to_string(),
        resolution: WindowResolution::new(side, side),
        ..Default::default()
    };

    // env_logger already owns the global logger
    let plugins = DefaultPlugins
        .set(WindowPlugin {
            primary_window: Some(window),
            ..Default::default()
        })
        .disable::<LogPlugin>();

    App::new()
        .insert_resource(Playback { trajectory, plan, frame: 0, scale })
        .insert_resource(Time::<Fixed>::from_hz(plan.fps))
        .add_plugins(plugins)
        .add_systems(Startup, setup_bodies_system)
        .add_systems(FixedUpdate, advance_frame_system)
        .add_systems(Update, sync_transforms_system)
        .run();
}

fn setup_bodies_system(mut commands: Commands, playback: Res<Playback>, mut meshes: ResMut<Assets<Mesh>>, mut materials: ResMut<Assets<ColorMaterial>>) {
    commands.spawn(Camera2dBundle::default());

    let Some(initial) = playback.trajectory.states.first() else {
        return;
    };

    for (i, x) in initial.x.iter().enumerate() {
        commands.spawn((
            MaterialMesh2dBundle {
                mesh: Mesh2dHandle(meshes.add(Circle::new(BODY_RADIUS))),
                material: materials.add(ColorMaterial::from(Color::WHITE)),
                transform: Transform::from_xyz(x.x as f32 * playback.scale, x.y as f32 * playback.scale, 0.0),
                ..Default::default()
            },
            BodyIndex(i),
        ));
    }
}

// One frame per fixed tick, looping back to the start
fn advance_frame_system(mut playback: ResMut<Playback>) {
    playback.frame = (playback.frame + 1) % (playback.plan.n_frames + 1);
}

fn sync_transforms_system(playback: Res<Playback>, mut query: Query<(&BodyIndex, &mut Transform)>) {
    let step = playback.plan.step_of(playback.frame);
    let Some(state) = playback.trajectory.states.get(step) else {
        return;
    };

    for (BodyIndex(i), mut transform) in &mut query {
        if let Some(x) = state.x.get(*i) {
            transform.translation.x = x.x as f32 * playback.scale;
            transform.translation.y = x.y as f32 * playback.scale;
        }
    }
}

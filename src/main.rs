use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use liquid2d::{LiquidPlugin, LiquidState, SimulationConfig};

// Strength of a click and of a drag, matching the canvas demo.
const CLICK_STRENGTH: f32 = 100.0;
const DRAG_STRENGTH: f32 = 10.0;
const PARTICLE_RADIUS: f32 = 12.0;

#[derive(Component)]
struct ParticleVisual {
    index: usize,
}

#[derive(Component)]
struct DiagnosticsText;

#[derive(Resource, Clone, Copy)]
struct ContainerSize(Vec2);

// Simulation space is canvas-like: origin top-left, y down.
fn sim_to_world(position: Vec2, size: Vec2) -> Vec3 {
    Vec3::new(position.x - size.x * 0.5, size.y * 0.5 - position.y, 0.0)
}

fn world_to_sim(position: Vec2, size: Vec2) -> Vec2 {
    Vec2::new(position.x + size.x * 0.5, size.y * 0.5 - position.y)
}

fn init(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<ColorMaterial>>,
    state: Res<LiquidState>,
    size: Res<ContainerSize>,
) {
    commands.spawn(Camera2d);

    let mesh = meshes.add(Circle::new(PARTICLE_RADIUS));
    let material = materials.add(Color::srgb(0.0, 0.3, 0.9));
    for (index, &position) in state.positions().iter().enumerate() {
        commands.spawn((
            ParticleVisual { index },
            Mesh2d(mesh.clone()),
            MeshMaterial2d(material.clone()),
            Transform::from_translation(sim_to_world(position, size.0)),
        ));
    }

    commands.spawn((
        Text::default(),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(10.0),
            left: Val::Px(10.0),
            ..default()
        },
        DiagnosticsText,
    ));
}

fn controls(
    mut state: ResMut<LiquidState>,
    windows: Query<&Window>,
    camera_query: Query<(&Camera, &GlobalTransform)>,
    input: Res<ButtonInput<KeyCode>>,
    mouse: Res<ButtonInput<MouseButton>>,
    size: Res<ContainerSize>,
) {
    if input.just_pressed(KeyCode::KeyR) {
        state.reset();
    }

    let Ok(window) = windows.single() else {
        return;
    };
    let Some(cursor_pos) = window.cursor_position() else {
        return;
    };
    let Ok((camera, camera_transform)) = camera_query.single() else {
        return;
    };
    let Ok(world_pos) = camera.viewport_to_world_2d(camera_transform, cursor_pos) else {
        return;
    };

    let sim_pos = world_to_sim(world_pos, size.0);
    let strength = if mouse.just_pressed(MouseButton::Left) {
        CLICK_STRENGTH
    } else if mouse.pressed(MouseButton::Left) {
        DRAG_STRENGTH
    } else {
        return;
    };
    state.add_force_at(sim_pos.x, sim_pos.y, strength);
}

fn update_particle_transforms(
    state: Res<LiquidState>,
    size: Res<ContainerSize>,
    mut query: Query<(&ParticleVisual, &mut Transform)>,
) {
    let positions = state.positions();
    for (visual, mut transform) in query.iter_mut() {
        if let Some(&position) = positions.get(visual.index) {
            transform.translation = sim_to_world(position, size.0);
        }
    }
}

fn update_diagnostics(
    diagnostics: Res<DiagnosticsStore>,
    state: Res<LiquidState>,
    mut query: Query<&mut Text, With<DiagnosticsText>>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|fps| fps.smoothed())
        .unwrap_or(0.0);
    let report = state.last_report();

    for mut text in &mut query {
        text.0 = format!(
            "FPS: {:.1}\nParticles: {}\nPairs: {}\nMax density: {:.2}\n[R] reset, click to splash",
            fps,
            state.particle_count(),
            report.neighbor_pairs,
            report.max_density,
        );
    }
}

fn main() {
    let spill = std::env::args().any(|arg| arg == "spill");
    let config = if spill {
        SimulationConfig::will_spill()
    } else {
        SimulationConfig::webgl_fluid()
    };
    let size = config.bounds();

    let plugin = match LiquidPlugin::new(config) {
        Ok(plugin) if spill => plugin.with_corner_wedges(),
        Ok(plugin) => plugin,
        Err(err) => {
            eprintln!("invalid liquid configuration: {err}");
            std::process::exit(1);
        }
    };

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "liquid2d".into(),
                ..default()
            }),
            ..default()
        }))
        .add_plugins(FrameTimeDiagnosticsPlugin::default())
        .add_plugins(plugin)
        .insert_resource(ContainerSize(size))
        .add_systems(Startup, init)
        .add_systems(
            Update,
            (
                controls.before(liquid2d::step_liquid),
                update_particle_transforms.after(liquid2d::step_liquid),
                update_diagnostics,
            ),
        )
        .run();
}

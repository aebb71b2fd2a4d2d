use crate::{
    animation::ease::Ease,
    config::model::{
        AgentKind, AgentSpec, Anchor, FallbackSpec, HubSpec, MoteSpec, NodeFieldSpec, Palette,
        ParallaxSpec, PathCurve, Region, Route, SpawnPolicy, SurfaceConfig,
    },
    foundation::color::Rgba8,
    foundation::core::Point,
    foundation::error::{PulseError, PulseResult},
};

/// Names accepted by [`preset`].
pub const PRESET_NAMES: [&str; 4] = ["ai-flow", "enhanced-ai-flow", "mcp-ros2", "digital-twins"];

/// Look up a built-in variant by name.
pub fn preset(name: &str) -> PulseResult<SurfaceConfig> {
    match name {
        "ai-flow" => Ok(ai_flow()),
        "enhanced-ai-flow" => Ok(enhanced_ai_flow()),
        "mcp-ros2" => Ok(mcp_ros2()),
        "digital-twins" => Ok(digital_twins()),
        other => Err(PulseError::config(format!(
            "unknown preset '{other}' (expected one of: {})",
            PRESET_NAMES.join(", ")
        ))),
    }
}

fn agent(kind: AgentKind, x: f64, y: f64, label: &str) -> AgentSpec {
    AgentSpec {
        kind,
        at: Point::new(x, y),
        label: Some(label.to_owned()),
    }
}

fn robot_trio(xs: [f64; 3]) -> Vec<AgentSpec> {
    vec![
        agent(AgentKind::Drone, xs[0], 0.25, "Drone"),
        agent(AgentKind::Rover, xs[1], 0.5, "Rover"),
        agent(AgentKind::Arm, xs[2], 0.75, "Robotic Arm"),
    ]
}

/// Neural field on the left feeding a central hub that relays to three robots.
pub(crate) fn ai_flow() -> SurfaceConfig {
    let mut routes = vec![Route::new(Anchor::Nodes, Anchor::Hub)];
    routes.extend((0..3).map(|i| Route::new(Anchor::Hub, Anchor::Agent(i)).sized(2.0)));

    SurfaceConfig {
        name: "ai-flow".to_owned(),
        description: "AI to Robotics Flow Diagram".to_owned(),
        seed: 0x5EED_0001,
        max_dpr: 2.0,
        max_step_ms: 100.0,
        glow_decay_ms: 2000.0,
        nodes: NodeFieldSpec {
            count: 12,
            region: Region::new(0.05, 0.2, 0.25, 0.6),
            radius: [2.0, 5.0],
            opacity: [0.3, 0.7],
            pulse_rate: 3.0,
            link_distance: 80.0,
            link_probability: 0.3,
        },
        hub: Some(HubSpec {
            at: Point::new(0.5, 0.5),
            radius: 20.0,
            label: Some("MCP ROS2".to_owned()),
        }),
        agents: robot_trio([0.75, 0.8, 0.75]),
        routes,
        spawn: SpawnPolicy::Interval { every_ms: 2000.0 },
        particle_speed: 0.48,
        ease: Ease::InOutCubic,
        max_particles: 24,
        arrival_radius: 20.0,
        motes: None,
        parallax: None,
        palette: Palette {
            background: None,
            grid: None,
            node: Rgba8::rgb(0x00, 0xFF, 0xFF),
            link: Rgba8::rgb(0x00, 0xFF, 0xFF),
            hub: Rgba8::rgb(0x00, 0x80, 0xFF),
            accent: Rgba8::rgb(0xFF, 0xFF, 0xFF),
            agent: Rgba8::rgb(0x00, 0xFF, 0x7F),
            particle: Rgba8::rgb(0x8A, 0x2B, 0xE2),
        },
        fallback: FallbackSpec {
            view_box: [800.0, 400.0],
            caption: Some("AI \u{2192} MCP ROS2 \u{2192} Robotics Integration".to_owned()),
        },
    }
}

/// Darker variant with a grid backdrop, a larger hub and two colored legs.
pub(crate) fn enhanced_ai_flow() -> SurfaceConfig {
    let cyan = Rgba8::rgb(0, 212, 255);
    let green = Rgba8::rgb(0, 255, 136);
    let orange = Rgba8::rgb(255, 140, 0);

    let mut routes = vec![Route::new(Anchor::Nodes, Anchor::Hub).colored(cyan)];
    routes.extend((0..3).map(|i| Route::new(Anchor::Hub, Anchor::Agent(i)).colored(green)));

    SurfaceConfig {
        name: "enhanced-ai-flow".to_owned(),
        description: "AI to MCP ROS2 to Robotics Flow Animation".to_owned(),
        seed: 0x5EED_0002,
        nodes: NodeFieldSpec {
            count: 15,
            region: Region::new(0.06, 0.12, 0.25, 0.76),
            radius: [2.0, 6.0],
            opacity: [0.3, 0.8],
            pulse_rate: 3.0,
            link_distance: 80.0,
            link_probability: 1.0,
        },
        hub: Some(HubSpec {
            at: Point::new(0.5, 0.5),
            radius: 30.0,
            label: Some("MCP ROS2".to_owned()),
        }),
        agents: robot_trio([0.81, 0.85, 0.87]),
        routes,
        spawn: SpawnPolicy::Interval { every_ms: 1500.0 },
        ease: Ease::Linear,
        palette: Palette {
            background: Some(Rgba8::rgba(15, 20, 25, 242)),
            grid: Some(Rgba8::rgba(0, 212, 255, 26)),
            node: cyan,
            link: Rgba8::rgba(0, 212, 255, 77),
            hub: green,
            accent: Rgba8::rgb(255, 255, 255),
            agent: orange,
            particle: cyan,
        },
        ..ai_flow()
    }
}

/// AI agents on the left, the MCP bridge in the middle and ROS 2 primitives on the right.
pub(crate) fn mcp_ros2() -> SurfaceConfig {
    let purple = Rgba8::rgb(0x8b, 0x5c, 0xf6);
    let green = Rgba8::rgb(0x10, 0xb9, 0x81);
    let amber = Rgba8::rgb(0xf5, 0x9e, 0x0b);

    let bends = [-0.25, 0.0, 0.25];
    let mut routes = vec![
        Route::new(Anchor::Nodes, Anchor::Hub)
            .curved(PathCurve::Quadratic { bend: 0.15 })
            .colored(purple),
    ];
    routes.extend(bends.iter().enumerate().map(|(i, &bend)| {
        Route::new(Anchor::Hub, Anchor::Agent(i))
            .curved(PathCurve::Quadratic { bend })
            .colored(amber)
            .sized(2.5)
    }));

    SurfaceConfig {
        name: "mcp-ros2".to_owned(),
        description: "MCP ROS2 architecture diagram showing AI agents connected to ROS 2 systems \
                      through the MCP protocol"
            .to_owned(),
        seed: 0x5EED_0003,
        nodes: NodeFieldSpec {
            count: 10,
            region: Region::new(0.1, 0.15, 0.16, 0.7),
            radius: [2.5, 5.0],
            opacity: [0.4, 0.8],
            pulse_rate: 2.0,
            link_distance: 120.0,
            link_probability: 0.5,
        },
        hub: Some(HubSpec {
            at: Point::new(0.5, 0.5),
            radius: 28.0,
            label: Some("MCP".to_owned()),
        }),
        agents: vec![
            agent(AgentKind::Drone, 0.78, 0.24, "Topics"),
            agent(AgentKind::Rover, 0.78, 0.5, "Services"),
            agent(AgentKind::Arm, 0.78, 0.76, "Actions"),
        ],
        routes,
        spawn: SpawnPolicy::Interval { every_ms: 1200.0 },
        particle_speed: 0.6,
        max_particles: 32,
        motes: Some(MoteSpec {
            anchors: vec![Anchor::Hub, Anchor::Nodes, Anchor::Agent(1)],
            spawn_every_ms: 120.0,
            cap: 40,
            jitter: 7.5,
            drift: 12.0,
            rise: [0.0, 0.0],
            life_ms: [830.0, 1670.0],
            size: [1.0, 2.5],
        }),
        palette: Palette {
            background: Some(Rgba8::rgba(12, 12, 20, 242)),
            grid: None,
            node: purple,
            link: Rgba8::rgba(0x8b, 0x5c, 0xf6, 90),
            hub: green,
            accent: Rgba8::rgb(255, 255, 255),
            agent: amber,
            particle: green,
        },
        fallback: FallbackSpec {
            view_box: [900.0, 500.0],
            caption: None,
        },
        ..ai_flow()
    }
}

/// Physical robots at the bottom syncing upward into a twin hub and simulation engines.
pub(crate) fn digital_twins() -> SurfaceConfig {
    let blue = Rgba8::rgb(0x3b, 0x82, 0xf6);
    let violet = Rgba8::rgb(0x8b, 0x5c, 0xf6);
    let amber = Rgba8::rgb(0xf5, 0x9e, 0x0b);

    let mut routes = vec![Route::new(Anchor::Nodes, Anchor::Hub).colored(blue)];
    routes.extend((0..3).map(|i| {
        Route::new(Anchor::Hub, Anchor::Agent(i))
            .curved(PathCurve::Quadratic { bend: 0.1 })
            .colored(violet)
            .sized(2.0)
    }));

    SurfaceConfig {
        name: "digital-twins".to_owned(),
        description: "Digital Twins architecture showing layers from physical world to simulation"
            .to_owned(),
        seed: 0x5EED_0004,
        nodes: NodeFieldSpec {
            count: 16,
            region: Region::new(0.11, 0.78, 0.78, 0.16),
            radius: [2.0, 4.0],
            opacity: [0.35, 0.75],
            pulse_rate: 2.5,
            link_distance: 90.0,
            link_probability: 0.4,
        },
        hub: Some(HubSpec {
            at: Point::new(0.5, 0.5),
            radius: 24.0,
            label: Some("Digital Twin".to_owned()),
        }),
        agents: vec![
            agent(AgentKind::Arm, 0.25, 0.16, "O3DE"),
            agent(AgentKind::Drone, 0.5, 0.14, "Isaac Sim"),
            agent(AgentKind::Rover, 0.75, 0.16, "Genesis"),
        ],
        routes,
        spawn: SpawnPolicy::Probability { per_frame: 0.025 },
        particle_speed: 0.5,
        max_particles: 30,
        motes: Some(MoteSpec {
            anchors: vec![Anchor::Nodes, Anchor::Hub],
            spawn_every_ms: 120.0,
            cap: 40,
            jitter: 10.0,
            drift: 9.0,
            rise: [-30.0, -12.0],
            life_ms: [1000.0, 2000.0],
            size: [1.0, 3.0],
        }),
        parallax: Some(ParallaxSpec {
            strength: 0.015,
            ambient: 1.0,
            field: 0.2,
            flow: 0.3,
            hub: 0.3,
            agents: 0.4,
        }),
        palette: Palette {
            background: Some(Rgba8::rgba(10, 10, 18, 242)),
            grid: None,
            node: blue,
            link: Rgba8::rgba(0x3b, 0x82, 0xf6, 80),
            hub: violet,
            accent: Rgba8::rgb(255, 255, 255),
            agent: amber,
            particle: violet,
        },
        fallback: FallbackSpec {
            view_box: [900.0, 550.0],
            caption: None,
        },
        ..ai_flow()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/presets.rs"]
mod tests;

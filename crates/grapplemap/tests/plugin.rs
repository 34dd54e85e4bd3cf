use bevy::prelude::*;
use grapplemap::prelude::*;
use grapplemap_core::{
    command::Command,
    graph::serial::{
        EndpointSerial, GraphSerial, NodeSerial, PoseSerial, ReoSerial, TransitionSerial, V3Serial,
    },
    joint::JOINT_COUNT,
};
use std::{sync::Arc, time::Duration};

fn pose(shift: f32) -> PoseSerial {
    (0..2)
        .map(|p| {
            (0..JOINT_COUNT)
                .map(|j| V3Serial {
                    x: p as f32 + j as f32 * 0.01 + shift,
                    y: j as f32 * 0.05,
                    z: -(p as f32) * 0.5,
                })
                .collect()
        })
        .collect()
}

/// Three nodes in a row, joined by transitions of 5 and 4 frames with identity endpoints.
fn database() -> Arc<Graph> {
    let endpoint = |node| EndpointSerial {
        node,
        reo: ReoSerial::default(),
    };
    let transition = |id: u32, len: usize| TransitionSerial {
        id,
        from: endpoint(id),
        to: endpoint(id + 1),
        frames: (0..len)
            .map(|f| pose(id as f32 + f as f32 / (len - 1) as f32))
            .collect(),
        description: vec![],
        tags: vec![],
        properties: vec![],
        line_nr: None,
    };
    let serial = GraphSerial {
        nodes: (0..3)
            .map(|id| NodeSerial {
                id,
                position: pose(id as f32),
                incoming: vec![],
                outgoing: vec![],
                description: vec![],
                tags: vec![],
                line_nr: None,
            })
            .collect(),
        transitions: vec![transition(0, 5), transition(1, 4)],
    };
    Arc::new(Graph::try_from(serial).unwrap())
}

fn app(graph: Arc<Graph>) -> App {
    let mut app = App::new();
    app.add_plugins(GrapplePlugin {
        config: PlaybackConfig {
            frame_duration: 0.25,
            ..Default::default()
        },
    })
    .insert_resource(GraphDatabase(graph));
    app.finish();
    app.cleanup();
    app
}

fn step(app: &mut App, seconds: f32) {
    app.world_mut()
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(seconds));
    app.update();
}

fn settings(app: &App) -> PlaybackConfig {
    app.world().resource::<PlaybackSettings>().0.clone()
}

#[test]
fn drill_advances_with_time() {
    let graph = database();
    let mut app = app(graph.clone());
    let link: PathLink = "0,1".parse().unwrap();
    let controller = PlaybackController::from_link(graph, &link, settings(&app)).unwrap();
    app.world_mut().resource_mut::<DrillPlayer>().play(controller);

    for _ in 0..4 {
        step(&mut app, 0.25);
    }

    let player = app.world().resource::<DrillPlayer>();
    let c = player.controller().unwrap().cursor();
    assert_eq!((c.seqindex, c.frame_in_seq, c.frame), (1, 0, 4));
    assert!(player.pose().is_some());
}

#[test]
fn commands_are_applied_on_update() {
    let graph = database();
    let mut app = app(graph.clone());
    let controller =
        PlaybackController::from_steps(graph, vec![Step::forward(TransitionId(0))], settings(&app))
            .unwrap();
    app.world_mut()
        .resource_mut::<DrillPlayer>()
        .play(controller)
        .send(Command::TogglePause)
        .send(Command::Append(Step::forward(TransitionId(1))))
        .send(Command::Seek(6));

    step(&mut app, 0.25);

    let mut player = app.world_mut().resource_mut::<DrillPlayer>();
    let controller = player.controller().unwrap();
    assert!(controller.is_paused());
    assert_eq!(controller.link().to_string(), "0,1");
    assert_eq!(controller.cursor().frame, 6);
    assert!(player.take_error().is_none());
}

#[test]
fn rejected_commands_report_an_error() {
    let graph = database();
    let mut app = app(graph.clone());
    let controller =
        PlaybackController::from_steps(graph, vec![Step::forward(TransitionId(0))], settings(&app))
            .unwrap();
    app.world_mut()
        .resource_mut::<DrillPlayer>()
        .play(controller)
        .send(Command::Append(Step::forward(TransitionId(0))));

    step(&mut app, 0.1);

    let mut player = app.world_mut().resource_mut::<DrillPlayer>();
    assert!(matches!(
        player.take_error(),
        Some(PathError::Disconnected { .. })
    ));
    assert_eq!(player.controller().unwrap().steps().len(), 1);
}

#[test]
fn explorer_follows_hovered_nodes() {
    let graph = database();
    let mut app = app(graph.clone());
    let explorer = Explorer::new(graph.clone(), settings(&app));
    app.world_mut()
        .resource_mut::<ExplorePlayer>()
        .start(explorer)
        .hover(NodeId(0))
        .hover(NodeId(1));

    step(&mut app, 0.1);

    let player = app.world().resource::<ExplorePlayer>();
    let explorer = player.explorer().unwrap();
    assert_eq!(explorer.selected(), Some(NodeId(1)));
    assert_eq!(explorer.queued_frames().len(), 4);
    assert!(player.pose().is_some());

    for _ in 0..100 {
        step(&mut app, 0.1);
    }
    let player = app.world().resource::<ExplorePlayer>();
    assert!(player.explorer().unwrap().queued_frames().is_empty());
    let end = &graph.nodes()[1].position;
    assert!(player.pose().unwrap().approx_eq(end, 1e-3));
}

#[test]
fn requested_drills_are_built_from_the_database() {
    let mut app = app(database());
    app.world_mut()
        .resource_mut::<DrillPlayer>()
        .load("0,1".parse().unwrap())
        .send(Command::TogglePause);

    step(&mut app, 0.25);

    let player = app.world().resource::<DrillPlayer>();
    let controller = player.controller().unwrap();
    assert_eq!(controller.link().to_string(), "0,1");
    assert_eq!(controller.config().frame_duration, 0.25);
    assert!(controller.is_paused());
    assert_eq!(controller.cursor().frame, 0);
}

#[test]
fn requests_wait_for_a_database() {
    let mut app = App::new();
    app.add_plugins(GrapplePlugin::default());
    app.finish();
    app.cleanup();
    app.world_mut()
        .resource_mut::<DrillPlayer>()
        .load(PathLink::Node(NodeId(2)));
    step(&mut app, 0.1);
    assert!(app.world().resource::<DrillPlayer>().controller().is_none());

    app.insert_resource(GraphDatabase(database()));
    step(&mut app, 0.1);
    let player = app.world().resource::<DrillPlayer>();
    let controller = player.controller().unwrap();
    assert_eq!(controller.start_node(), NodeId(2));
    assert!(controller.steps().is_empty());
}

#[test]
fn unplayable_requests_report_an_error() {
    let mut app = app(database());
    app.world_mut()
        .resource_mut::<DrillPlayer>()
        .load("1,0".parse().unwrap());

    step(&mut app, 0.1);

    let mut player = app.world_mut().resource_mut::<DrillPlayer>();
    assert!(player.controller().is_none());
    assert!(matches!(
        player.take_error(),
        Some(PathError::Disconnected { index: 1, .. })
    ));
}

#[test]
fn hovering_explores_the_database() {
    let mut app = app(database());
    app.world_mut()
        .resource_mut::<ExplorePlayer>()
        .hover(NodeId(1))
        .hover(NodeId(2));

    step(&mut app, 0.1);

    let player = app.world().resource::<ExplorePlayer>();
    let explorer = player.explorer().unwrap();
    assert_eq!(explorer.selected(), Some(NodeId(2)));
    assert_eq!(explorer.queued_frames().len(), 3);
}

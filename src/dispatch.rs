//! The boundary between background work and the main schedule.
//!
//! Sensor fixes and routing responses are computed on the async compute pool.
//! They never touch the map surface directly: each background future resolves
//! to a [`UiCallback`], and [`run_ui_callbacks`] applies ready callbacks to the
//! `World` from the main schedule. Nothing else re-enters the UI context.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;
use std::future::Future;

/// Work to run on the main schedule once a background future completes
pub type UiCallback = Box<dyn FnOnce(&mut World) + Send + 'static>;

/// What a background task is doing, so it can be cancelled by kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackgroundKind {
    Sensing,
    Routing,
}

/// A pending background future. Despawning the entity cancels it.
#[derive(Component)]
pub struct BackgroundTask {
    pub kind: BackgroundKind,
    task: Task<UiCallback>,
}

/// Spawn `work` on the async compute pool; its callback later runs on the main schedule.
///
/// Returns the task entity, so a caller can cancel it before its spawn command is applied.
pub fn run_in_background<F>(commands: &mut Commands, kind: BackgroundKind, work: F) -> Entity
where
    F: Future<Output = UiCallback> + Send + 'static,
{
    let task = AsyncComputeTaskPool::get().spawn(work);
    commands.spawn(BackgroundTask { kind, task }).id()
}

/// Cancel every in-flight task of the given kind
pub fn cancel_background(
    commands: &mut Commands,
    tasks: &Query<(Entity, &BackgroundTask)>,
    kind: BackgroundKind,
) {
    for (entity, task) in tasks.iter() {
        if task.kind == kind {
            commands.entity(entity).despawn();
        }
    }
}

/// Poll all background tasks and run the callbacks of the finished ones
pub fn run_ui_callbacks(world: &mut World) {
    let mut ready: Vec<(Entity, UiCallback)> = Vec::new();

    let mut query = world.query::<(Entity, &mut BackgroundTask)>();
    for (entity, mut pending) in query.iter_mut(world) {
        if let Some(callback) = future::block_on(future::poll_once(&mut pending.task)) {
            ready.push((entity, callback));
        }
    }

    for (entity, callback) in ready {
        world.despawn(entity);
        callback(world);
    }
}

pub struct DispatchPlugin;

impl Plugin for DispatchPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(PreUpdate, run_ui_callbacks);
    }
}

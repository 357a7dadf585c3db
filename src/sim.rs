use std::{
    sync::mpsc::{self, TryRecvError},
    thread::{self, JoinHandle},
    time::{Duration, Instant},
};

use tracing::{error, info};

use crate::World;

pub const MIN_TICK: Duration = Duration::from_millis(10);
pub const MAX_TICK: Duration = Duration::from_millis(3200);
pub const DEFAULT_TICK: Duration = Duration::from_millis(200);

const EVT_CHECK_TIMEOUT: Duration = Duration::from_millis(5);

/// copy of the simulation state handed out to viewers.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub world: World,
    pub paused: bool,
    pub tick: Duration,
}

#[derive(Debug)]
pub enum SimCmd {
    Snapshot(mpsc::Sender<Snapshot>),
    TogglePause,
    ToggleWrap,
    Accelerate,
    Decelerate,
    Stop,
}

#[derive(Debug, Clone)]
pub struct SimHandle {
    sender: mpsc::Sender<SimCmd>,
}

impl SimHandle {
    /// returns `None` once the simulation has stopped.
    pub fn snapshot(&self) -> Option<Snapshot> {
        let (sender, receiver) = mpsc::channel();
        self.sender.send(SimCmd::Snapshot(sender)).ok()?;
        receiver.recv().ok()
    }

    /// returns `false` once the simulation has stopped.
    pub fn send(&self, cmd: SimCmd) -> bool {
        self.sender.send(cmd).is_ok()
    }
}

#[derive(Debug)]
pub struct Sim {
    thread: JoinHandle<()>,
    sender: mpsc::Sender<SimCmd>,
}

impl Sim {
    pub fn spawn(world: World, tick: Duration) -> Self {
        let state = State::new(world, tick);
        let (sender, receiver) = mpsc::channel();
        let thread = thread::spawn(move || sim_loop(receiver, state));
        Self { thread, sender }
    }

    pub fn handle(&self) -> SimHandle {
        let sender = self.sender.clone();
        SimHandle { sender }
    }

    pub fn join(self) {
        drop(self.sender);
        if self.thread.join().is_err() {
            error!("simulation thread panicked");
        }
    }
}

struct State {
    world: World,
    paused: bool,
    tick: Duration,
    last_update: Instant,
}

impl State {
    fn new(world: World, tick: Duration) -> Self {
        Self {
            world,
            paused: false,
            tick: tick.clamp(MIN_TICK, MAX_TICK),
            last_update: Instant::now(),
        }
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            world: self.world.clone(),
            paused: self.paused,
            tick: self.tick,
        }
    }

    /// returns `false` when the loop should stop.
    fn apply(&mut self, cmd: SimCmd) -> bool {
        match cmd {
            SimCmd::Snapshot(sender) => {
                // the viewer may already be gone
                let _ = sender.send(self.snapshot());
            }
            SimCmd::TogglePause => self.paused = !self.paused,
            SimCmd::ToggleWrap => {
                let wrap = !self.world.wrap();
                self.world.set_wrap(wrap);
            }
            SimCmd::Accelerate => self.tick = (self.tick / 2).max(MIN_TICK),
            SimCmd::Decelerate => self.tick = (self.tick * 2).min(MAX_TICK),
            SimCmd::Stop => return false,
        }
        true
    }

    fn update(&mut self) {
        if self.paused || self.last_update.elapsed() < self.tick {
            return;
        }
        self.world.step();
        self.last_update = Instant::now();
    }
}

fn sim_loop(receiver: mpsc::Receiver<SimCmd>, mut state: State) {
    info!(
        width = state.world.width(),
        height = state.world.height(),
        wrap = state.world.wrap(),
        population = state.world.population(),
        "simulation started"
    );
    'sim: loop {
        loop {
            match receiver.try_recv() {
                Ok(cmd) => {
                    if !state.apply(cmd) {
                        break 'sim;
                    }
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => break 'sim,
            }
        }
        state.update();
        thread::sleep(EVT_CHECK_TIMEOUT);
    }
    info!(generation = state.world.generation(), "simulation stopped");
}

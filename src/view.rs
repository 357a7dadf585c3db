use std::{
    io::{self, stdin, stdout, Write},
    sync::mpsc,
    thread::{self, JoinHandle},
    time::Duration,
};

use termion::{event::Key, input::TermRead, raw::IntoRawMode};
use tracing::debug;

use crate::{pos, Board, Pos, SimCmd, SimHandle, Snapshot};

pub use canvas::Canvas;
mod canvas;

pub struct View {
    thread: JoinHandle<io::Result<()>>,
}

impl View {
    pub fn spawn(handle: SimHandle) -> Self {
        let thread = thread::spawn(|| view_loop(handle));
        Self { thread }
    }

    pub fn join(self) -> io::Result<()> {
        self.thread
            .join()
            .unwrap_or_else(|_| Err(io::Error::other("view thread panicked")))
    }
}

#[derive(Debug)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

#[derive(Debug)]
pub enum InputCmd {
    Exit,
    Move(Dir),
    Sim(SimCmd),
}

fn key_command(key: Key) -> Option<InputCmd> {
    let command = match key {
        Key::Char('q') | Key::Esc | Key::Ctrl('c') => InputCmd::Exit,
        Key::Up => InputCmd::Move(Dir::Up),
        Key::Down => InputCmd::Move(Dir::Down),
        Key::Left => InputCmd::Move(Dir::Left),
        Key::Right => InputCmd::Move(Dir::Right),
        Key::Char(' ') => InputCmd::Sim(SimCmd::TogglePause),
        Key::Char('w') => InputCmd::Sim(SimCmd::ToggleWrap),
        Key::Char('+') => InputCmd::Sim(SimCmd::Accelerate),
        Key::Char('-') => InputCmd::Sim(SimCmd::Decelerate),
        _ => return None,
    };
    Some(command)
}

fn input_loop(sender: mpsc::Sender<InputCmd>) {
    for key in stdin().keys() {
        let Ok(key) = key else { break };
        let Some(command) = key_command(key) else {
            continue;
        };
        if sender.send(command).is_err() {
            break;
        }
    }
}

const VIEW_REFRESH_INTERVAL: Duration = Duration::from_millis(50);

/// hides the cursor while alive, and clears the screen and shows it again when dropped.
struct CursorGuard<W: Write> {
    out: W,
}

impl<W: Write> CursorGuard<W> {
    fn new(mut out: W) -> io::Result<Self> {
        write!(out, "{}", termion::cursor::Hide)?;
        Ok(Self { out })
    }

    fn out(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for CursorGuard<W> {
    fn drop(&mut self) {
        // nothing left to report to once the terminal itself fails
        let _ = write!(
            self.out,
            "{}{}{}",
            termion::clear::All,
            termion::cursor::Goto(1, 1),
            termion::cursor::Show
        );
        let _ = self.out.flush();
    }
}

fn view_loop(handle: SimHandle) -> io::Result<()> {
    let mut screen = CursorGuard::new(stdout().into_raw_mode()?)?;

    let (sender, receiver) = mpsc::channel();
    let _input_handle = thread::spawn(|| input_loop(sender));

    let mut view_origin = pos!(0, 0);
    let result = render_loop(&handle, &receiver, &mut view_origin, screen.out());
    handle.send(SimCmd::Stop);
    result
}

fn render_loop(
    handle: &SimHandle,
    receiver: &mpsc::Receiver<InputCmd>,
    view_origin: &mut Pos,
    out: &mut impl Write,
) -> io::Result<()> {
    while handle_inputs(receiver, handle, view_origin) {
        let Some(snapshot) = handle.snapshot() else {
            break;
        };
        let mut canvas = Canvas::from_screen()?;
        draw(&mut canvas, &snapshot, *view_origin);
        canvas.display(out)?;
        thread::sleep(VIEW_REFRESH_INTERVAL);
    }
    Ok(())
}

/// returns `false` once the user asked to leave.
fn handle_inputs(
    receiver: &mpsc::Receiver<InputCmd>,
    handle: &SimHandle,
    view_origin: &mut Pos,
) -> bool {
    while let Ok(cmd) = receiver.try_recv() {
        debug!(?cmd, "input");
        match cmd {
            InputCmd::Exit => return false,
            InputCmd::Move(direction) => {
                *view_origin = *view_origin
                    + match direction {
                        Dir::Up => pos!(0, -4),
                        Dir::Down => pos!(0, 4),
                        Dir::Left => pos!(-4, 0),
                        Dir::Right => pos!(4, 0),
                    }
            }
            InputCmd::Sim(cmd) => {
                if !handle.send(cmd) {
                    return false;
                }
            }
        }
    }
    true
}

/// draws the part of the world seen from `view_origin`, dotting cells off the grid.
pub fn draw(canvas: &mut Canvas, snapshot: &Snapshot, view_origin: Pos) {
    let world = &snapshot.world;
    let topology = world.topology();
    canvas.layer(|pos| (!topology.contains(view_origin + pos)).then_some('.'));
    world.traverse(|pos| {
        canvas.plot(pos - view_origin, '#');
        false
    });

    let state = if snapshot.paused { "paused" } else { "running" };
    let mode = if world.wrap() { "torus" } else { "bounded" };
    canvas.set_status(format!(
        "gen {} | pop {} | {}x{} {} | {}ms {} | q quit, arrows pan, space pause, w wrap, +/- speed",
        world.generation(),
        world.population(),
        world.width(),
        world.height(),
        mode,
        snapshot.tick.as_millis(),
        state,
    ));
}

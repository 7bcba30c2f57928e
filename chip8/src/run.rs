use anyhow::Result;

use chip8_core::{frame_to_text, Chip8, Trace};

/// How the driving loop paces the machine.
#[derive(Clone, Debug)]
pub struct Options {
    /// Print every executed instruction
    pub trace: bool,
    /// Instructions executed per second
    pub clock_hz: u32,
    /// Timer decrements per second
    pub timer_hz: u32,
    /// Stop after this many instructions
    pub max_cycles: Option<u64>,
    /// Window size multiplier
    #[cfg(feature = "sdl")]
    pub scale: u32,
    /// Never open a window
    pub headless: bool,
}

/// Why a headless run stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The pc ran off the end of the program
    Finished { cycles: u64 },
    /// `max_cycles` instructions were executed
    CycleLimit { cycles: u64 },
}

impl Options {
    /// Instructions executed between timer ticks when pacing by instruction count.
    fn cycles_per_tick(&self) -> u64 {
        u64::from((self.clock_hz / self.timer_hz.max(1)).max(1))
    }
}

pub fn run(chip8: Chip8, options: &Options) -> Result<()> {
    #[cfg(feature = "sdl")]
    {
        if !options.headless {
            return window::run(chip8, options);
        }
    }
    #[cfg(not(feature = "sdl"))]
    {
        if !options.headless {
            eprintln!("built without the sdl feature, running headless");
        }
    }
    run_headless(chip8, options)
}

fn run_headless(mut chip8: Chip8, options: &Options) -> Result<()> {
    let outcome = drive(&mut chip8, options, |trace| {
        if options.trace {
            println!("{}", trace);
        }
    });

    print!("{}", frame_to_text(chip8.frame_buffer()));
    match outcome? {
        Outcome::Finished { cycles } => println!("program finished after {} cycles", cycles),
        Outcome::CycleLimit { cycles } => println!("stopped after {} cycles", cycles),
    }
    Ok(())
}

/// Steps the machine as fast as possible, ticking its timers once every
/// `clock_hz / timer_hz` instructions.
pub fn drive(
    chip8: &mut Chip8,
    options: &Options,
    mut on_trace: impl FnMut(&Trace),
) -> Result<Outcome> {
    let cycles_per_tick = options.cycles_per_tick();
    let mut cycles: u64 = 0;

    loop {
        if options.max_cycles.map_or(false, |max| cycles >= max) {
            return Ok(Outcome::CycleLimit { cycles });
        }

        match chip8.step() {
            Ok(Some(trace)) => on_trace(&trace),
            Ok(None) => return Ok(Outcome::Finished { cycles }),
            Err(e) => {
                return Err(anyhow::Error::new(e).context(format!("halted after {} cycles", cycles)))
            }
        }

        cycles += 1;
        if cycles % cycles_per_tick == 0 {
            chip8.tick_timers();
        }
    }
}

#[cfg(feature = "sdl")]
mod window {
    use std::time::{Duration, Instant};

    use anyhow::{anyhow, Result};
    use sdl2::event::Event;
    use sdl2::keyboard::Keycode;

    use chip8_core::Chip8;
    use chip8_display::Display;

    use super::Options;
    use crate::keymap::keymap;

    pub fn run(mut chip8: Chip8, options: &Options) -> Result<()> {
        // Get SDL2 context
        let sdl: sdl2::Sdl = sdl2::init().map_err(|e| anyhow!(e))?;
        let mut display = Display::new(&sdl, options.scale).map_err(|e| anyhow!(e))?;
        let mut events = sdl.event_pump().map_err(|e| anyhow!(e))?;

        // Set initial timing
        let cycle_time = Duration::from_secs(1) / options.clock_hz.max(1);
        let tick_time = Duration::from_secs(1) / options.timer_hz.max(1);
        let mut last_cycle = Instant::now();
        let mut last_tick = Instant::now();
        let mut cycles: u64 = 0;

        // Whether or not the clock speed should be respected
        let mut fast_forward = false;

        'event: loop {
            // Render the frame if it changed
            if let Some(frame) = chip8.take_frame() {
                display.render(&frame).map_err(|e| anyhow!(e))?;
            }

            // Handle input
            for event in events.poll_iter() {
                match event {
                    Event::Quit { .. } => break 'event,
                    Event::KeyDown {
                        keycode: Some(key), ..
                    } => match (key, keymap(key)) {
                        (_, Some(kc)) => chip8.key_down(kc)?,
                        (Keycode::Space, _) => fast_forward = true,
                        (Keycode::Escape, _) => break 'event,
                        _ => continue,
                    },
                    Event::KeyUp {
                        keycode: Some(key), ..
                    } => match (key, keymap(key)) {
                        (_, Some(kc)) => chip8.key_up(kc)?,
                        (Keycode::Space, _) => fast_forward = false,
                        _ => continue,
                    },
                    _ => continue,
                };
            }

            // Update state
            match chip8.step() {
                Ok(Some(trace)) if options.trace => println!("{}", trace),
                Ok(Some(_)) => {}
                Ok(None) => {
                    println!("program finished after {} cycles", cycles);
                    break 'event;
                }
                Err(e) => {
                    return Err(
                        anyhow::Error::new(e).context(format!("halted after {} cycles", cycles))
                    )
                }
            }
            cycles += 1;
            if options.max_cycles.map_or(false, |max| cycles >= max) {
                println!("stopped after {} cycles", cycles);
                break 'event;
            }

            // Handle timing
            if last_tick.elapsed() >= tick_time {
                chip8.tick_timers();
                last_tick = Instant::now();
            }

            let current_time = Instant::now();
            let elapsed_cycle_time = current_time - last_cycle;
            if !fast_forward && cycle_time > elapsed_cycle_time {
                std::thread::sleep(cycle_time - elapsed_cycle_time);
            }
            last_cycle = Instant::now();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> Options {
        Options {
            trace: false,
            clock_hz: 600,
            timer_hz: 60,
            max_cycles: None,
            #[cfg(feature = "sdl")]
            scale: 10,
            headless: true,
        }
    }

    #[test]
    fn test_cycles_per_tick() {
        assert_eq!(options().cycles_per_tick(), 10);
        let slow = Options {
            clock_hz: 30,
            ..options()
        };
        assert_eq!(slow.cycles_per_tick(), 1);
        let no_timer = Options {
            timer_hz: 0,
            ..options()
        };
        assert_eq!(no_timer.cycles_per_tick(), 600);
    }

    #[test]
    fn test_drive_to_the_end() {
        let mut chip8 = Chip8::new();
        chip8.load(&[0x60, 0x0A, 0x61, 0x05, 0x80, 0x14]).unwrap();
        let mut traces = Vec::new();
        let outcome = drive(&mut chip8, &options(), |trace| traces.push(trace.to_string()));
        assert_eq!(outcome.unwrap(), Outcome::Finished { cycles: 3 });
        assert_eq!(traces[2], "0x0204: 8014 ADD V0, V1");
    }

    #[test]
    fn test_drive_stops_at_cycle_limit() {
        let mut chip8 = Chip8::new();
        // JP 0x200
        chip8.load(&[0x12, 0x00]).unwrap();
        let limited = Options {
            max_cycles: Some(25),
            ..options()
        };
        let outcome = drive(&mut chip8, &limited, |_| {});
        assert_eq!(outcome.unwrap(), Outcome::CycleLimit { cycles: 25 });
    }

    #[test]
    fn test_drive_ticks_timers() {
        let mut chip8 = Chip8::new();
        // LD V0, 0x05; LD DT, V0; JP 0x204
        chip8.load(&[0x60, 0x05, 0xF0, 0x15, 0x12, 0x04]).unwrap();
        let limited = Options {
            max_cycles: Some(32),
            ..options()
        };
        drive(&mut chip8, &limited, |_| {}).unwrap();
        // ticks land on cycles 10, 20 and 30
        assert_eq!(chip8.state().delay_timer, 2);
    }

    #[test]
    fn test_drive_surfaces_errors() {
        let mut chip8 = Chip8::new();
        chip8.load(&[0x00, 0xEE]).unwrap();
        let error = drive(&mut chip8, &options(), |_| {}).unwrap_err();
        assert_eq!(error.to_string(), "halted after 0 cycles");
        assert!(format!("{:#}", error).contains("stack underflow"));
    }
}

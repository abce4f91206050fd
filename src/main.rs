//! PathPrint entry point
//!
//! Wires pointer input to a simulation session on the web, or plays a
//! scripted run headlessly on native.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::collections::VecDeque;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use pathprint::platform;
    use pathprint::sim::{InputEvent, Session, generate_daily_level, level_by_id};
    use pathprint::submission::{OutcomeQueue, RunResult, submission_seed};
    use pathprint::{HighScores, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        seed: String,
        queue: VecDeque<InputEvent>,
        outcomes: OutcomeQueue,
        highscores: HighScores,
    }

    impl Game {
        /// Start the given level and remember it for the next visit
        fn new(level_id: u32, settings: &mut Settings) -> Self {
            let today = platform::today_utc();
            let level = if level_id == pathprint::consts::DAILY_LEVEL_ID {
                generate_daily_level(today)
            } else {
                level_by_id(level_id)
            };
            // Unknown stored ids fall back to level 1; store what actually started
            settings.remember_level(level.id);
            Self {
                session: Session::new(level, settings.effective_tile_size(), platform::now_ms()),
                seed: submission_seed(today),
                queue: VecDeque::new(),
                outcomes: OutcomeQueue::default(),
                highscores: HighScores::load(),
            }
        }

        /// Process queued input, then hand finished runs to the page
        fn pump(&mut self) {
            self.session.drain(&mut self.queue, &mut self.outcomes);

            while let Some(outcome) = self.outcomes.pop() {
                let level = self.session.level().id;
                if let Some(rank) = self.highscores.add_outcome(level, &outcome, platform::now_ms()) {
                    log::info!("New high score! Rank #{}", rank);
                    self.highscores.save();
                }
                match RunResult::from_outcome(level, &self.seed, &outcome).to_json() {
                    Ok(json) => publish_result(&json),
                    Err(e) => log::warn!("Failed to encode result: {}", e),
                }
            }

            publish_frame(&self.session.snapshot().to_ascii());
        }
    }

    // Page-side hooks; the page renders frames and submits results
    #[wasm_bindgen(inline_js = "
        export function publish_frame(frame) {
            window.dispatchEvent(new CustomEvent('pathprint:frame', { detail: frame }));
        }
        export function publish_result(json) {
            window.dispatchEvent(new CustomEvent('pathprint:result', { detail: json }));
        }
    ")]
    extern "C" {
        fn publish_frame(frame: &str);
        fn publish_result(json: &str);
    }

    pub fn run() {
        let mut settings = Settings::load();
        let Some(canvas) = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id("canvas"))
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element found");
            return;
        };

        let game = Rc::new(RefCell::new(Game::new(settings.last_level, &mut settings)));
        game.borrow_mut().pump();

        add_pointer_listener(&canvas, "pointerdown", game.clone(), |e| InputEvent::PointerDown {
            x: e.offset_x() as f32,
            y: e.offset_y() as f32,
        });
        add_pointer_listener(&canvas, "pointermove", game.clone(), |e| InputEvent::PointerMove {
            x: e.offset_x() as f32,
            y: e.offset_y() as f32,
        });
        add_pointer_listener(&canvas, "pointerup", game, |_| InputEvent::PointerUp {
            time_ms: platform::now_ms(),
        });

        log::info!("PathPrint ready");
    }

    fn add_pointer_listener(
        canvas: &HtmlCanvasElement,
        name: &str,
        game: Rc<RefCell<Game>>,
        to_input: fn(&PointerEvent) -> InputEvent,
    ) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let mut g = game.borrow_mut();
            g.queue.push_back(to_input(&event));
            g.pump();
        });
        let _ = canvas.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::collections::VecDeque;

    use pathprint::sim::{InputEvent, Session, generate_daily_level, level_by_id};
    use pathprint::submission::{OutcomeQueue, RunResult, submission_seed};
    use pathprint::{GridPos, Settings, platform};

    env_logger::init();
    log::info!("PathPrint (native) starting...");
    log::info!("Native mode is headless - build for wasm32 to play in the browser");

    let settings = Settings::load();
    let tile = settings.effective_tile_size();
    let center = |x: i32, y: i32| ((x as f32 + 0.5) * tile, (y as f32 + 0.5) * tile);
    let down = |p: GridPos| {
        let (x, y) = center(p.x, p.y);
        InputEvent::PointerDown { x, y }
    };
    let step = |p: GridPos| {
        let (x, y) = center(p.x, p.y);
        InputEvent::PointerMove { x, y }
    };

    // Scripted run on level 1: down the left column, along the mid row,
    // then up and down the mid column.
    let start = platform::now_ms();
    let mut queue = VecDeque::new();
    let strokes: [&[(i32, i32)]; 3] = [
        &[(1, 2), (1, 3), (1, 4), (2, 4), (3, 4), (4, 4), (5, 4), (6, 4)],
        &[(5, 4), (4, 4), (4, 3), (4, 2), (4, 1)],
        &[(4, 2), (4, 3), (4, 4), (4, 5), (4, 6)],
    ];
    for (i, stroke) in strokes.iter().enumerate() {
        let mut cells = stroke.iter().map(|&(x, y)| GridPos::new(x, y));
        if let Some(first) = cells.next() {
            queue.push_back(down(first));
        }
        queue.extend(cells.map(step));
        queue.push_back(InputEvent::PointerUp {
            time_ms: start + 4_000.0 * (i + 1) as f64,
        });
    }

    let seed = submission_seed(platform::today_utc());
    let mut session = Session::new(level_by_id(1), tile, start);
    let mut outcomes = OutcomeQueue::default();
    session.drain(&mut queue, &mut outcomes);

    println!("{}", session.snapshot().to_ascii());
    match outcomes.pop() {
        Some(outcome) => match RunResult::from_outcome(1, &seed, &outcome).to_json() {
            Ok(json) => println!("Result: {}", json),
            Err(e) => log::warn!("Failed to encode result: {}", e),
        },
        None => println!("Run still in progress"),
    }

    let daily = generate_daily_level(platform::today_utc());
    println!(
        "Today: {} ({}x{}, {} targets)",
        daily.name,
        daily.width,
        daily.height,
        daily.target_count()
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

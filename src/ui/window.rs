// src/ui/window.rs

use super::interactions::{reload, setup_interactions};
use crate::rendering::painter;
use crate::state::AppState;
use gtk4::prelude::*;
use gtk4::Box as GtkBox;
use gtk4::{Application, ApplicationWindow, DrawingArea, Frame, Orientation, ScrolledWindow, TextView};
use std::cell::RefCell;
use std::rc::Rc;

pub const APP_ID: &str = "org.mavensgroup.tetview";

/// Run the viewer until its window closes.
///
/// `notices` are messages produced before the console logger existed; they
/// are logged once it is installed.
pub fn run(state: AppState, notices: Vec<String>) -> gtk4::glib::ExitCode {
  let app = Application::builder().application_id(APP_ID).build();

  // The application is activated once; hand the state over on that call
  let pending = RefCell::new(Some((state, notices)));
  app.connect_activate(move |app| {
    if let Some((state, notices)) = pending.borrow_mut().take() {
      build_ui(app, state, &notices);
    }
  });

  // Our own arguments were parsed by clap already
  app.run_with_args::<&str>(&[])
}

fn build_ui(app: &Application, initial_state: AppState, notices: &[String]) {
  let state = Rc::new(RefCell::new(initial_state));

  let window = ApplicationWindow::builder()
    .application(app)
    .title("tetview")
    .default_width(1000)
    .default_height(800)
    .build();

  // 1. Drawing area on top, console below
  let root_vbox = GtkBox::new(Orientation::Vertical, 0);
  window.set_child(Some(&root_vbox));

  let drawing_area = DrawingArea::new();
  drawing_area.set_vexpand(true);
  drawing_area.set_hexpand(true);

  let info_frame = Frame::new(None);
  let console_view = TextView::builder()
    .editable(false)
    .cursor_visible(false)
    .monospace(true)
    .left_margin(10)
    .right_margin(10)
    .top_margin(10)
    .bottom_margin(10)
    .build();
  let scroll_win = ScrolledWindow::builder()
    .min_content_height(150)
    .child(&console_view)
    .build();
  info_frame.set_child(Some(&scroll_win));

  root_vbox.append(&drawing_area);
  root_vbox.append(&info_frame);

  if let Err(e) = crate::utils::logger::init(&console_view) {
    eprintln!("Console logger unavailable: {}", e);
  }
  for msg in notices {
    log::info!("{}", msg);
  }
  log::info!("Keys: Left/Right frames, g ghosts, i periodic images, w wrap, r reset view, s save PNG");

  // 2. Interactions
  setup_interactions(&window, state.clone(), &drawing_area);

  // 3. Drawing function
  let s = state.clone();
  drawing_area.set_draw_func(move |_, cr, w, h| {
    let st = s.borrow();
    let result = painter::paint_scene(
      cr,
      &st.scene,
      &st.view,
      Some(st.config.style.background_color),
      w as f64,
      h as f64,
      st.config.output.fill,
      false,
    );
    if let Err(e) = result {
      log::warn!("Drawing failed: {}", e);
    }
  });

  // 4. First frame
  reload(&window, &mut state.borrow_mut(), &drawing_area);

  window.present();
}

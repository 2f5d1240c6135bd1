// src/ui/interactions.rs

use crate::state::AppState;
use gtk4::gdk;
use gtk4::glib;
use gtk4::{self as gtk, prelude::*};
use gtk4::{ApplicationWindow, EventControllerKey, EventControllerScroll, EventControllerScrollFlags, GestureDrag};
use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

/// Degrees of rotation per dragged pixel
const DRAG_SENSITIVITY: f64 = 0.4;

/// Re-read the current file and refresh title + canvas.
pub fn reload(window: &ApplicationWindow, st: &mut AppState, drawing_area: &gtk::DrawingArea) {
  if let Err(e) = st.load_current() {
    log::error!("{}", e);
  }
  window.set_title(Some(st.title().as_str()));
  drawing_area.queue_draw();
}

pub fn setup_interactions(
  window: &ApplicationWindow,
  state: Rc<RefCell<AppState>>,
  drawing_area: &gtk::DrawingArea,
) {
  // 1. KEYBOARD CONTROLLER
  let key_controller = EventControllerKey::new();
  let s = state.clone();
  let da = drawing_area.clone();
  let win = window.clone();

  key_controller.connect_key_pressed(move |_, keyval, _keycode, _modifiers| {
    let mut st = s.borrow_mut();

    // A. Frame stepping
    let delta = match keyval {
      gdk::Key::Right | gdk::Key::n | gdk::Key::Page_Down => Some(1),
      gdk::Key::Left | gdk::Key::p | gdk::Key::Page_Up => Some(-1),
      gdk::Key::Home => Some(-(st.frames.len() as isize)),
      gdk::Key::End => Some(st.frames.len() as isize),
      _ => None,
    };
    if let Some(d) = delta {
      if st.step(d) {
        reload(&win, &mut st, &da);
      }
      return glib::Propagation::Stop;
    }

    // B. Style switches
    let msg = match keyval {
      gdk::Key::g => Some(st.toggle_ghosts()),
      gdk::Key::i => Some(st.toggle_periodic_images()),
      gdk::Key::w => Some(st.toggle_wrap()),
      _ => None,
    };
    if let Some(msg) = msg {
      log::info!("{}", msg);
      if let Err(e) = st.rebuild_scene() {
        log::error!("{}", e);
      }
      da.queue_draw();
      return glib::Propagation::Stop;
    }

    // C. View + export
    match keyval {
      gdk::Key::r => {
        st.reset_view();
        da.queue_draw();
        glib::Propagation::Stop
      }
      gdk::Key::s => {
        match st.save_frame(&PathBuf::from(".")) {
          Ok(path) => log::info!("Saved frame to {}", path.display()),
          Err(e) => log::error!("Could not save frame: {}", e),
        }
        glib::Propagation::Stop
      }
      _ => glib::Propagation::Proceed,
    }
  });
  window.add_controller(key_controller);

  // 2. MOUSE DRAG (ORBIT)
  let drag = GestureDrag::new();
  let drag_start = Rc::new(RefCell::new((0.0, 0.0)));

  let s = state.clone();
  let start = drag_start.clone();
  drag.connect_drag_begin(move |_, _, _| {
    let st = s.borrow();
    *start.borrow_mut() = (st.view.azimuth, st.view.elevation);
  });

  let s = state.clone();
  let da = drawing_area.clone();
  let start = drag_start.clone();
  drag.connect_drag_update(move |_, dx, dy| {
    let (az0, el0) = *start.borrow();
    let mut st = s.borrow_mut();
    st.view.azimuth = az0 + dx * DRAG_SENSITIVITY;
    st.view.elevation = (el0 + dy * DRAG_SENSITIVITY).clamp(-90.0, 90.0);
    da.queue_draw();
  });
  drawing_area.add_controller(drag);

  // 3. SCROLL (ZOOM)
  let scroll = EventControllerScroll::new(EventControllerScrollFlags::VERTICAL);
  let s = state.clone();
  let da = drawing_area.clone();
  scroll.connect_scroll(move |_, _, dy| {
    let mut st = s.borrow_mut();
    if dy > 0.0 {
      st.view.zoom *= 0.9;
    } else {
      st.view.zoom *= 1.1;
    }
    da.queue_draw();
    glib::Propagation::Stop
  });
  drawing_area.add_controller(scroll);
}

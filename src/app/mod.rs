// App module - the operation set a front-end builds on
//
// This module contains:
// - AppController: settings, resolved paths and services behind one handle,
//   exposing every operation the command line (or any other front-end) invokes

pub mod controller;

pub use controller::AppController;

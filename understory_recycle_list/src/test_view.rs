// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A recording view shared by the unit tests.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;

use kurbo::Size;

use crate::{ItemView, Placement, ViewType};

#[derive(Clone, Debug, Default)]
pub(crate) struct TestView {
    pub(crate) id: u32,
    pub(crate) view_type: ViewType,
    pub(crate) size: Size,
    pub(crate) bound: Option<usize>,
    pub(crate) placement: Placement,
    // Size on screen after the last placement.
    pub(crate) frame: Size,
    pub(crate) visible: bool,
    pub(crate) destroyed: Option<Rc<RefCell<Vec<u32>>>>,
}

impl TestView {
    pub(crate) fn new(id: u32, view_type: ViewType) -> Self {
        Self {
            id,
            view_type,
            ..Self::default()
        }
    }

    pub(crate) fn destroy_log() -> Rc<RefCell<Vec<u32>>> {
        Rc::new(RefCell::new(Vec::new()))
    }
}

impl ItemView for TestView {
    fn view_type(&self) -> ViewType {
        self.view_type
    }

    fn measure(&mut self) -> Size {
        self.size
    }

    fn place(&mut self, placement: Placement) {
        self.placement = placement;
        self.frame = placement.resolve(self.size);
    }

    fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    fn destroy(&mut self) {
        if let Some(log) = &self.destroyed {
            log.borrow_mut().push(self.id);
        }
    }
}

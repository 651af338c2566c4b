// Copyright 2022 Twitter, Inc.
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::chart::Format;

use serde_derive::Deserialize;
use std::path::PathBuf;

#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Output {
    directory: Option<PathBuf>,
    #[serde(default)]
    format: Format,
    #[serde(default = "default_width")]
    width: u32,
    #[serde(default = "default_height")]
    height: u32,
}

impl Output {
    pub fn directory(&self) -> Option<PathBuf> {
        self.directory.clone()
    }

    pub fn set_directory(&mut self, directory: Option<PathBuf>) {
        self.directory = directory;
    }

    pub fn format(&self) -> Format {
        self.format
    }

    pub fn set_format(&mut self, format: Format) {
        self.format = format;
    }

    /// image size in pixels
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn set_width(&mut self, width: u32) {
        self.width = width;
    }

    pub fn set_height(&mut self, height: u32) {
        self.height = height;
    }
}

impl Default for Output {
    fn default() -> Output {
        Output {
            directory: None,
            format: Default::default(),
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_width() -> u32 {
    1024
}

fn default_height() -> u32 {
    768
}

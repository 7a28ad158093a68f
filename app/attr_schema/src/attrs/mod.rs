/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

pub mod attr;
pub mod attr_type;
pub mod builder;
pub mod constraints;
pub mod error;
pub mod id;
pub mod label;
pub mod literal;
pub mod name;
pub mod schema;
mod validate;

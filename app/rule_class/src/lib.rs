/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Rule classes: a rule kind's identity bound to its merged attribute schema.
//!
//! Rule classes are defined once, at registration time, before any target is analyzed. A
//! successfully built [`RuleClassDescriptor`](descriptor::RuleClassDescriptor) cannot fail later
//! because of a malformed schema.

pub mod config;
pub mod definition;
pub mod descriptor;
pub mod environment;
pub mod factory;
pub mod internal;
pub mod registry;
pub mod rules;

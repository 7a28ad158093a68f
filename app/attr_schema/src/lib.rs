/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 *
 * This source code is licensed under both the MIT license found in the
 * LICENSE-MIT file in the root directory of this source tree and the Apache
 * License, Version 2.0 found in the LICENSE-APACHE file in the root directory
 * of this source tree.
 */

//! Attribute schemas for build rule kinds.
//!
//! A rule author declares the inputs a rule kind accepts with an
//! [`AttributeSchemaBuilder`](attrs::builder::AttributeSchemaBuilder). Building it validates the
//! whole declaration at once and produces an immutable [`AttributeSchema`](attrs::schema::AttributeSchema)
//! that the build engine queries for label resolution, configuration transitions and docs.

pub mod attrs;

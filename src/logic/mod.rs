// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Side-effecting operations run by command workers: file loading and HTTP submission.

pub mod attachment;
pub mod submission;

// Floodnet: Static Layer-2 Flow Provisioning for Emulated Networks
// Copyright (C) 2026  The Floodnet Developers
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use floodnet::topologies;
use floodnet_runtime::{perform_check, perform_lab};

use clap::{Parser, Subcommand};
use log::*;
use std::error::Error;

#[derive(Parser, Debug)]
#[clap(name = "floodnet", about = "Static layer-2 flood provisioning over an emulated network")]
struct CommandLineArguments {
    /// Action to perform
    #[clap(subcommand)]
    cmd: MainCommand,
}

#[derive(Subcommand, Debug)]
enum MainCommand {
    /// Boot the emulated lab network, provision all switches, test connectivity and enter the
    /// platform prompt
    #[clap(name = "run")]
    Run {
        /// Skip the interactive prompt after provisioning
        #[clap(long)]
        no_cli: bool,
        /// Write the per-pair probe report to this file as JSON
        #[clap(long)]
        json: Option<String>,
    },
    /// Provision the lab topology on the in-memory simulator and report the outcome
    #[clap(name = "check")]
    Check,
}

fn main() -> Result<(), Box<dyn Error>> {
    // default to informational verbosity
    if std::env::var_os("RUST_LOG").is_none() {
        std::env::set_var("RUST_LOG", "info");
    }
    pretty_env_logger::init();

    // run clap
    let args = CommandLineArguments::parse();

    let topo = topologies::lab_net();
    let ok = match args.cmd {
        MainCommand::Run { no_cli, json } => perform_lab(&topo, !no_cli, json)?,
        MainCommand::Check => perform_check(&topo)?,
    };

    if !ok {
        error!("Connectivity check failed");
        std::process::exit(1);
    }
    info!("All host pairs are connected");
    Ok(())
}

//  Copyright (C) 2014-2023 Ryan Specialty, LLC.
//
//  This file is part of TAME.
//
//  This program is free software: you can redistribute it and/or modify
//  it under the terms of the GNU General Public License as published by
//  the Free Software Foundation, either version 3 of the License, or
//  (at your option) any later version.
//
//  This program is distributed in the hope that it will be useful,
//  but WITHOUT ANY WARRANTY; without even the implied warranty of
//  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
//  GNU General Public License for more details.
//
//  You should have received a copy of the GNU General Public License
//  along with this program.  If not, see <http://www.gnu.org/licenses/>.

use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::path::PathBuf;
use std::process::Command;

type TestResult = Result<(), Box<dyn std::error::Error>>;

fn fixture(path: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(path)
}

/// Command against the `basic` fixture.
fn basic() -> Result<Command, Box<dyn std::error::Error>> {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.env_remove("RUST_LOG");
    cmd.arg("-c").arg(fixture("basic"));
    cmd.arg("--classes").arg(fixture("basic/classes.xml"));

    Ok(cmd)
}

#[test]
fn invalid_argument() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.arg("-q");
    cmd.assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("Unrecognized option:"));

    Ok(())
}

#[test]
fn missing_class_index_option() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.arg("-c").arg(fixture("basic"));
    cmd.assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("classes"));

    Ok(())
}

#[test]
fn invalid_emit() -> TestResult {
    let mut cmd = basic()?;
    cmd.arg("--emit").arg("foo");
    cmd.assert()
        .failure()
        .code(exitcode::USAGE)
        .stderr(predicate::str::contains("--emit descriptors|access"));

    Ok(())
}

#[test]
fn help() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.arg("--help");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("--classes INDEX"));

    Ok(())
}

#[test]
fn class_index_does_not_exist() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.arg("--classes").arg(fixture("does-not-exist.xml"));
    cmd.assert()
        .failure()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("failed to open class index"));

    Ok(())
}

#[test]
fn class_index_malformed() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.arg("--classes").arg(fixture("malformed-classes.xml"));
    cmd.assert()
        .failure()
        .code(exitcode::NOINPUT)
        .stderr(predicate::str::contains("failed to read class index"))
        .stderr(predicate::str::contains("SOMETIMES"));

    Ok(())
}

#[test]
fn descriptors_in_registration_order() -> TestResult {
    basic()?
        .assert()
        .success()
        .stdout(predicate::eq(
            "entity com.example.A PROPERTY (2 members)\n\
             embeddable com.example.Address FIELD (2 members)\n\
             entity com.example.B FIELD (2 members)\n",
        ))
        .stderr(predicate::str::contains(
            "com.example.Ghost is mapped in xml, but class does not exist",
        ))
        .stderr(predicate::str::contains("1 warning(s)"));

    Ok(())
}

#[test]
fn access_table_sorted_by_name() -> TestResult {
    let mut cmd = basic()?;
    cmd.arg("--emit").arg("access");
    cmd.assert().success().stdout(predicate::eq(
        "com.example.A PROPERTY\n\
         com.example.Address FIELD\n\
         com.example.B FIELD\n\
         com.example.Ghost PROPERTY\n",
    ));

    Ok(())
}

#[test]
fn additional_mapping_documents() -> TestResult {
    let mut cmd = basic()?;
    cmd.arg("--orm-xml").arg("/META-INF/extra.xml, /META-INF/absent.xml");
    cmd.arg("--emit").arg("access");
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("com.example.A FIELD\n"))
        .stdout(predicate::str::contains("com.example.C FIELD\n"))
        .stderr(predicate::str::contains("com.example.A has already been processed"))
        .stderr(predicate::str::contains("2 warning(s)"));

    Ok(())
}

#[test]
fn xml_complete_unit_ignores_annotations() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.env_remove("RUST_LOG");
    cmd.arg("-c").arg(fixture("complete"));
    cmd.arg("--classes").arg(fixture("basic/classes.xml"));
    cmd.assert()
        .success()
        .stdout(predicate::eq("entity com.example.C PROPERTY (0 members)\n"))
        .stderr(predicate::str::is_empty());

    Ok(())
}

#[test]
fn first_classpath_root_wins() -> TestResult {
    let mut cmd = Command::cargo_bin("metagen")?;
    cmd.env_remove("RUST_LOG");
    cmd.arg("-c").arg(fixture("complete"));
    cmd.arg("-c").arg(fixture("basic"));
    cmd.arg("--classes").arg(fixture("basic/classes.xml"));

    // The unit metadata of shop.xml is found before that of the
    //   xml-complete orm.xml.
    cmd.assert().success().stdout(predicate::eq(
        "entity com.example.A PROPERTY (2 members)\n\
         embeddable com.example.Address PROPERTY (2 members)\n\
         entity com.example.C FIELD (0 members)\n",
    ));

    Ok(())
}

#[test]
fn custom_persistence_descriptor_location() -> TestResult {
    let mut cmd = basic()?;
    cmd.arg("--persistence-xml").arg("/META-INF/absent.xml");
    cmd.arg("--emit").arg("access");

    // Without shop.xml there are no unit defaults.
    cmd.assert().success().stdout(predicate::eq(
        "com.example.B FIELD\n\
         com.example.Ghost PROPERTY\n",
    ));

    Ok(())
}

#[test]
fn verbose_logs_progress() -> TestResult {
    let mut cmd = basic()?;
    cmd.arg("-v");
    cmd.assert()
        .success()
        .stderr(predicate::str::contains("reading resource /META-INF/orm.xml"))
        .stderr(predicate::str::contains("/META-INF/absent.xml not found"));

    Ok(())
}

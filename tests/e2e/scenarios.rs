use httpmock::prelude::*;

use super::harness::{TestContext, parse_json};

pub struct Scenario {
    pub name: &'static str,
    pub run: fn(&TestContext) -> Result<(), String>,
}

pub fn scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "help_output",
            run: scenario_help,
        },
        Scenario {
            name: "invalid_resolver",
            run: scenario_invalid_resolver,
        },
        Scenario {
            name: "missing_only_manifest",
            run: scenario_missing_only_manifest,
        },
        Scenario {
            name: "empty_project_dir",
            run: scenario_empty_project_dir,
        },
        Scenario {
            name: "manifest_without_declarations",
            run: scenario_manifest_without_declarations,
        },
        Scenario {
            name: "invalid_config",
            run: scenario_invalid_config,
        },
        Scenario {
            name: "podfile_mixed_readiness",
            run: scenario_podfile_mixed_readiness,
        },
        Scenario {
            name: "cartfile_direct_repository",
            run: scenario_cartfile_direct_repository,
        },
        Scenario {
            name: "discovered_manifests",
            run: scenario_discovered_manifests,
        },
        Scenario {
            name: "missing_manifest_among_others",
            run: scenario_missing_manifest_among_others,
        },
        Scenario {
            name: "json_output",
            run: scenario_json_output,
        },
        Scenario {
            name: "branch_flag",
            run: scenario_branch_flag,
        },
        Scenario {
            name: "config_override",
            run: scenario_config_override,
        },
    ]
}

fn repo_page(base: &str, repo: &str) -> String {
    format!(
        r#"<html><body><ul class="links">
  <li><a href="{base}/{repo}/wiki">Documentation</a></li>
  <li><a href="{base}/{repo}">GitHub Repo</a></li>
</ul></body></html>"#,
        base = base,
        repo = repo
    )
}

fn scenario_help(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("help")?;
    let output = ctx.run_spmready(&env, &["--help"])?;
    output.assert_success()?;
    output.assert_stdout_contains("Usage")?;
    output.assert_stdout_contains("--resolver")?;
    Ok(())
}

fn scenario_invalid_resolver(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("invalid-resolver")?;
    let output = ctx.run_spmready(&env, &["--resolver", "spm"])?;
    output.assert_failure()?;
    output.assert_stderr_contains("Unknown resolver")?;
    Ok(())
}

fn scenario_missing_only_manifest(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("missing-only")?;
    let output = ctx.run_spmready(&env, &["Podfile"])?;
    output.assert_failure()?;
    output.assert_stderr_contains("Failed to open manifest")?;
    output.assert_stderr_contains("No dependencies found")?;
    output.assert_stdout_not_contains("Found")?;
    Ok(())
}

fn scenario_empty_project_dir(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("empty-dir")?;
    let output = ctx.run_spmready(&env, &[])?;
    output.assert_failure()?;
    output.assert_stderr_contains("No dependencies found")?;
    Ok(())
}

fn scenario_manifest_without_declarations(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("no-declarations")?;
    env.write_manifest(
        "Podfile",
        "platform :ios, '13.0'\n# pod 'Commented'\ntarget 'App' do\nend\n",
    )?;

    let output = ctx.run_spmready(&env, &[])?;
    output.assert_failure()?;
    output.assert_stderr_contains("No dependencies found")?;
    Ok(())
}

fn scenario_invalid_config(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("invalid-config")?;
    env.write_config("{ not json")?;
    env.write_manifest("Cartfile", "github \"org/repo\"\n")?;

    let output = ctx.run_spmready(&env, &[])?;
    output.assert_failure()?;
    output.assert_stderr_contains("Failed to parse config file")?;
    Ok(())
}

fn scenario_podfile_mixed_readiness(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("podfile-mixed")?;
    let server = MockServer::start();
    let base = server.base_url();
    env.use_mock_server(&base)?;

    server.mock(|when, then| {
        when.method(GET).path("/pods/Alamofire");
        then.status(200)
            .body(repo_page(&base, "Alamofire/Alamofire"));
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/Alamofire/Alamofire/blob/master/Package.swift");
        then.status(200).body("// swift-tools-version:5.5");
    });
    server.mock(|when, then| {
        when.method(GET).path("/pods/Legacy");
        then.status(200).body(repo_page(&base, "old/Legacy.git"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/old/Legacy/blob/master/Package.swift");
        then.status(404).body("Not Found");
    });
    server.mock(|when, then| {
        when.method(GET).path("/pods/Ghost");
        then.status(404).body("<html>No such pod</html>");
    });

    env.write_manifest(
        "Podfile",
        "target 'App' do\n  pod 'Alamofire', '~> 5.0'\n  pod \"Legacy\"\n  pod 'Ghost'\nend\n",
    )?;

    let output = ctx.run_spmready(&env, &[])?;
    output.assert_success()?;
    output.assert_stdout_contains("Found 3 dependencies")?;
    output.assert_stdout_contains(&format!("✅ | Alamofire : {}/Alamofire/Alamofire", base))?;
    output.assert_stdout_contains(&format!("❌ | Legacy : {}/old/Legacy.git", base))?;
    output.assert_stdout_contains("❌ | Ghost : not found")?;
    output.assert_stdout_contains("Sorry 😢 - ✅ 1 | ❌ 2")?;
    Ok(())
}

fn scenario_cartfile_direct_repository(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("cartfile")?;
    let server = MockServer::start();
    env.use_mock_server(&server.base_url())?;

    let index = server.mock(|when, then| {
        when.method(GET).path("/pods/ReactiveX/RxSwift");
        then.status(200);
    });
    let probe = server.mock(|when, then| {
        when.method(GET)
            .path("/ReactiveX/RxSwift/blob/master/Package.swift");
        then.status(200);
    });

    env.write_manifest("Cartfile", "github \"ReactiveX/RxSwift\" ~> 6.0\n")?;

    let output = ctx.run_spmready(&env, &[])?;
    output.assert_success()?;
    output.assert_stdout_contains(&format!(
        "✅ | ReactiveX/RxSwift : {}/ReactiveX/RxSwift",
        server.base_url()
    ))?;
    output.assert_stdout_contains("🎊 you are ready for Swift Package Manager")?;
    index.assert_calls(0);
    probe.assert_calls(1);
    Ok(())
}

fn scenario_discovered_manifests(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("discovered")?;
    let server = MockServer::start();
    env.use_mock_server(&server.base_url())?;

    server.mock(|when, then| {
        when.method(GET).path("/org/Public/blob/master/Package.swift");
        then.status(200);
    });
    server.mock(|when, then| {
        when.method(GET).path("/org/Private/blob/master/Package.swift");
        then.status(200);
    });

    env.write_manifest("Cartfile", "github \"org/Public\"\n")?;
    env.write_manifest("Cartfile.private", "github \"org/Private\"\n")?;
    let project = env.project.to_string_lossy().to_string();

    // Run from the env root so only --dir can find the manifests
    let output = ctx.run_command(
        &ctx.bin_path,
        &["--dir", project.as_str()],
        &env.root,
        &env,
    )?;
    output.assert_success()?;
    output.assert_stdout_contains("Found 2 dependencies")?;

    let public = output
        .stdout
        .find("org/Public")
        .ok_or("org/Public missing")?;
    let private = output
        .stdout
        .find("org/Private")
        .ok_or("org/Private missing")?;
    if public > private {
        return Err("Cartfile should be processed before Cartfile.private".to_string());
    }
    Ok(())
}

fn scenario_missing_manifest_among_others(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("missing-among-others")?;
    let server = MockServer::start();
    env.use_mock_server(&server.base_url())?;

    env.write_manifest("Cartfile", "github \"org/repo\"\n")?;

    let output = ctx.run_spmready(&env, &["Podfile", "Cartfile"])?;
    output.assert_success()?;
    output.assert_stderr_contains("Failed to open manifest")?;
    output.assert_stdout_contains("Found 1 dependencies")?;
    output.assert_stdout_contains("❌ | org/repo")?;
    Ok(())
}

fn scenario_json_output(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("json")?;
    let server = MockServer::start();
    let base = server.base_url();
    env.use_mock_server(&base)?;

    server.mock(|when, then| {
        when.method(GET).path("/pods/SnapKit");
        then.status(200).body(repo_page(&base, "SnapKit/SnapKit"));
    });
    server.mock(|when, then| {
        when.method(GET).path("/SnapKit/SnapKit/blob/master/Package.swift");
        then.status(200);
    });

    env.write_manifest("Podfile", "pod 'SnapKit'\npod 'Ghost'\n")?;

    let output = ctx.run_spmready(&env, &["--json"])?;
    output.assert_success()?;
    output.assert_stdout_not_contains("Found")?;

    let json = parse_json(&output.stdout)?;
    let libraries = json["libraries"]
        .as_array()
        .ok_or("libraries should be an array")?;
    if libraries.len() != 2 {
        return Err(format!("Expected 2 libraries, got {}", libraries.len()));
    }
    if libraries[0]["name"] != "SnapKit" || libraries[0]["ready"] != true {
        return Err(format!("Unexpected first library: {}", libraries[0]));
    }
    if !libraries[1]["repository"].is_null() || libraries[1]["ready"] != false {
        return Err(format!("Unexpected second library: {}", libraries[1]));
    }
    if json["summary"]["ready"] != 1 || json["summary"]["not_ready"] != 1 {
        return Err(format!("Unexpected summary: {}", json["summary"]));
    }
    Ok(())
}

fn scenario_branch_flag(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("branch")?;
    let server = MockServer::start();
    env.use_mock_server(&server.base_url())?;

    let main = server.mock(|when, then| {
        when.method(GET).path("/org/repo/blob/main/Package.swift");
        then.status(200);
    });

    env.write_manifest("Cartfile", "github \"org/repo\"\n")?;

    let output = ctx.run_spmready(&env, &[])?;
    output.assert_success()?;
    output.assert_stdout_contains("❌ | org/repo")?;

    let output = ctx.run_spmready(&env, &["--branch", "main"])?;
    output.assert_success()?;
    output.assert_stdout_contains("✅ | org/repo")?;
    main.assert_calls(1);
    Ok(())
}

fn scenario_config_override(ctx: &TestContext) -> Result<(), String> {
    let env = ctx.create_env("config-override")?;
    let server = MockServer::start();
    let base = server.base_url();
    env.write_config(&format!(
        r#"{{
            "index_url": "{base}",
            "github_url": "{base}",
            "overrides": {{ "internalkit": {{ "repo": "{base}/mobile/InternalKit.git" }} }}
        }}"#,
        base = base
    ))?;

    let index = server.mock(|when, then| {
        when.method(GET).path("/pods/InternalKit");
        then.status(404);
    });
    server.mock(|when, then| {
        when.method(GET)
            .path("/mobile/InternalKit/blob/master/Package.swift");
        then.status(200);
    });

    env.write_manifest("Podfile", "pod 'InternalKit'\n")?;

    let output = ctx.run_spmready(&env, &[])?;
    output.assert_success()?;
    output.assert_stdout_contains(&format!("✅ | InternalKit : {}/mobile/InternalKit.git", base))?;
    index.assert_calls(0);
    Ok(())
}

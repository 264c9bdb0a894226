use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const VPC_VARIABLES: &str = r#"
variable "name" {
  description = "Name of the VPC"
  type        = string
}

variable "cidr_block" {
  type    = string
  default = "10.0.0.0/16"
}

variable "subnets" {
  type = list(object({
    name = string
    cidr = string
    zone = string
  }))
  default = []
}
"#;

const SETTINGS_VARIABLE: &str = r#"
variable "settings" {
  type = object({ alpha = string, beta = number, gamma = bool, delta = string })
}
"#;

#[test]
fn test_markdown_to_stdout() -> Result<()> {
    let test = CliTest::with_file("variables.tf", VPC_VARIABLES)?;

    assert_cmd_snapshot!(
        test.generate_command()
            .args(["-q", "-n", "vpc", "-s", "./modules/vpc"]),
        @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "vpc" {
      source = "./modules/vpc"

      # Required variables
      name = string

      # Optional variables
      # cidr_block = string
      # subnets = list(...)
    }
    ```

    ----- stderr -----
    "##
    );

    Ok(())
}

#[test]
fn test_json_to_stdout() -> Result<()> {
    let test = CliTest::with_file("variables.tf", VPC_VARIABLES)?;

    assert_cmd_snapshot!(test.generate_command().args(["-f", "json", "-n", "vpc"]), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "module_name": "vpc",
      "source": "path/to/module",
      "required": [
        {
          "name": "name",
          "type": "string",
          "description": "Name of the VPC"
        }
      ],
      "optional": [
        {
          "name": "cidr_block",
          "type": "string",
          "description": "",
          "default": "\"10.0.0.0/16\""
        },
        {
          "name": "subnets",
          "type": "list(...)",
          "description": "",
          "default": "[]"
        }
      ]
    }

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_declarations_merge_across_files() -> Result<()> {
    let test = CliTest::with_file("a.tf", "variable \"x\" {\n  type = string\n}\n")?;
    test.write_file("b.tf", "variable \"x\" {\n  type = number\n  default = 1\n}\n")?;

    assert_cmd_snapshot!(test.generate_command().arg("-q"), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Optional variables
      # x = number
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_unquoted_variable_name() -> Result<()> {
    let test = CliTest::with_file("main.tf", "variable replicas {\n  type = number\n}\n")?;

    assert_cmd_snapshot!(test.generate_command().arg("-q"), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      replicas = number
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_out_file() -> Result<()> {
    let test = CliTest::with_file("variables.tf", VPC_VARIABLES)?;

    assert_cmd_snapshot!(test.generate_command().args(["-o", "USAGE.md"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ✓ . -> USAGE.md
    ");

    let written = test.read_file("USAGE.md")?;
    assert!(written.starts_with("## Usage\n"));
    assert!(written.contains("module \"example\" {"));

    Ok(())
}

#[test]
fn test_default_detail_level() -> Result<()> {
    let test = CliTest::with_file("main.tf", SETTINGS_VARIABLE)?;

    assert_cmd_snapshot!(test.generate_command().arg("-q"), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      settings = object({alpha, beta, gamma, ...})
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_max_fields_flag() -> Result<()> {
    let test = CliTest::with_file("main.tf", SETTINGS_VARIABLE)?;

    assert_cmd_snapshot!(test.generate_command().args(["-q", "--max-fields", "1"]), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      settings = object({alpha, ...})
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_field_names_hidden() -> Result<()> {
    let test = CliTest::with_file("main.tf", SETTINGS_VARIABLE)?;

    assert_cmd_snapshot!(test.generate_command().args(["-q", "--no-field-names"]), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      settings = object({...})
    }
    ```

    ----- stderr -----
    "##);

    let minimal = test
        .generate_command()
        .args(["-q", "--detail-level", "minimal"])
        .output()?;
    assert!(String::from_utf8_lossy(&minimal.stdout).contains("  settings = object({...})\n"));

    Ok(())
}

#[test]
fn test_detailed_level() -> Result<()> {
    let test = CliTest::with_file("main.tf", SETTINGS_VARIABLE)?;

    assert_cmd_snapshot!(test.generate_command().args(["-q", "--detail-level", "detailed"]), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      settings = object({ alpha = string, beta = number, gamma = bool, delta = string })
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_config_file_formatting() -> Result<()> {
    let test = CliTest::with_file("main.tf", SETTINGS_VARIABLE)?;
    test.write_file(
        ".terraform-docs-extended.yml",
        r#"
type_formatting:
  max_fields_to_show: 2
  custom_formats:
    string: '"text"'
"#,
    )?;
    test.write_file("extra.tf", "variable \"label\" {\n  type = string\n}\n")?;

    assert_cmd_snapshot!(test.generate_command().arg("-q"), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      label = "text"
      settings = object({alpha, beta, ...})
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_custom_format_for_long_type() -> Result<()> {
    let test = CliTest::with_file(
        "main.tf",
        "variable \"owner\" {\n  type = object({name = string, age = number, address = string})\n}\n",
    )?;
    test.write_file(
        ".terraform-docs-extended.yml",
        r#"
type_formatting:
  custom_formats:
    "object({name = string, age = number, address = string})": PERSON
"#,
    )?;

    assert_cmd_snapshot!(test.generate_command().arg("-q"), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      owner = PERSON
    }
    ```

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_recursive_writes_into_each_module() -> Result<()> {
    let test = CliTest::with_file("main.tf", "variable \"env\" {}\n")?;
    test.write_file("modules/network/variables.tf", VPC_VARIABLES)?;
    test.write_file("modules/storage/main.tf", "variable \"bucket\" {\n  type = string\n}\n")?;
    test.write_file(".terraform/modules/cached/main.tf", "variable \"x\" {}\n")?;

    assert_cmd_snapshot!(test.generate_command().args(["-r", "-n", "root"]), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ✓ . -> ./USAGE.md
    ✓ ./modules/network -> ./modules/network/USAGE.md
    ✓ ./modules/storage -> ./modules/storage/USAGE.md
    ✓ Generated usage for 3 modules
    ");

    assert!(test.read_file("USAGE.md")?.contains("module \"root\" {"));
    assert!(
        test.read_file("modules/network/USAGE.md")?
            .contains("module \"network\" {")
    );
    let storage = test.read_file("modules/storage/USAGE.md")?;
    assert!(storage.contains("module \"storage\" {"));
    assert!(storage.contains("  bucket = string\n"));
    assert!(!test.root().join(".terraform/modules/cached/USAGE.md").exists());

    Ok(())
}

#[test]
fn test_recursive_output_name_and_format() -> Result<()> {
    let test = CliTest::with_file("modules/app/main.tf", "variable \"port\" {\n  type = number\n}\n")?;

    assert_cmd_snapshot!(
        test.generate_command()
            .args(["-r", "-q", "-f", "json", "-o", "docs/usage.json"]),
        @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    "
    );

    insta::assert_snapshot!(test.read_file("modules/app/usage.json")?, @r#"
    {
      "module_name": "app",
      "source": "path/to/module",
      "required": [
        {
          "name": "port",
          "type": "number",
          "description": ""
        }
      ],
      "optional": []
    }
    "#);

    Ok(())
}

#[test]
fn test_recursive_respects_config_ignores() -> Result<()> {
    let test = CliTest::with_file("modules/keep/main.tf", "variable \"a\" {}\n")?;
    test.write_file("modules/legacy/main.tf", "variable \"b\" {}\n")?;
    test.write_file(".terraform-docs-extended.yml", "ignores:\n  - modules/legacy\n")?;

    assert_cmd_snapshot!(test.generate_command().arg("-r"), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    ✓ ./modules/keep -> ./modules/keep/USAGE.md
    ✓ Generated usage for 1 module
    ");

    assert!(!test.root().join("modules/legacy/USAGE.md").exists());

    Ok(())
}

#[test]
fn test_recursive_without_modules() -> Result<()> {
    let test = CliTest::with_file("README.md", "# nothing here\n")?;

    assert_cmd_snapshot!(test.generate_command().arg("-r"), @r"
    success: true
    exit_code: 0
    ----- stdout -----

    ----- stderr -----
    warning: No Terraform modules found under .
    ");

    Ok(())
}

#[test]
fn test_broken_module_fails_fast() -> Result<()> {
    let test = CliTest::with_file("modules/good/main.tf", "variable \"a\" {}\n")?;
    test.write_file("modules/broken/main.tf", "variable \"b\" {\n  type = string\n")?;

    assert_cmd_snapshot!(test.generate_command().arg("-r"), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: failed to scan ./modules/broken/main.tf: line 1: `{` is never closed
    ");

    Ok(())
}

#[test]
fn test_keep_going_reports_every_module() -> Result<()> {
    let test = CliTest::with_file("modules/good/main.tf", "variable \"a\" {}\n")?;
    test.write_file("modules/broken/main.tf", "variable \"b\" {\n  description = \"oops\n}\n")?;

    assert_cmd_snapshot!(test.generate_command().args(["-r", "--keep-going"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    ✘ failed to scan ./modules/broken/main.tf: line 2: unterminated string literal
    ✓ ./modules/good -> ./modules/good/USAGE.md
    ✘ Generated usage for 1 of 2 modules, 1 failed
    ");

    assert!(test.root().join("modules/good/USAGE.md").exists());
    assert!(!test.root().join("modules/broken/USAGE.md").exists());

    Ok(())
}

#[test]
fn test_missing_path() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.generate_command().args(["-p", "does-not-exist"]), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Module path is not a directory: does-not-exist
    ");

    Ok(())
}

#[test]
fn test_unparsable_config() -> Result<()> {
    let test = CliTest::with_file("main.tf", "variable \"a\" {}\n")?;
    test.write_file(
        ".terraform-docs-extended.yml",
        "type_formatting:\n  detail_level: verbose\n",
    )?;

    let mut filters = test.filters();
    filters.push((r"(?m)(\.yml): .+$", "${1}: [REASON]"));
    insta::with_settings!({filters => filters}, {
        assert_cmd_snapshot!(test.generate_command(), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to parse config file: [PROJECT]/.terraform-docs-extended.yml: [REASON]
        ");
    });

    Ok(())
}

#[test]
fn test_invalid_config_value() -> Result<()> {
    let test = CliTest::with_file("main.tf", "variable \"a\" {}\n")?;
    test.write_file(
        ".terraform-docs-extended.yml",
        "type_formatting:\n  max_type_length: 0\n",
    )?;

    assert_cmd_snapshot!(test.generate_command(), @r"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: 'max_type_length' must be greater than zero
    ");

    Ok(())
}

#[test]
fn test_unavailable_backend_falls_back_to_source() -> Result<()> {
    let test = CliTest::with_file("main.tf", "variable \"region\" {\n  type = string\n}\n")?;
    test.write_file(
        ".terraform-docs-extended.yml",
        "backend:\n  command: tfdocs-ext-missing-backend\n",
    )?;

    assert_cmd_snapshot!(test.command(), @r##"
    success: true
    exit_code: 0
    ----- stdout -----
    ## Usage

    ```hcl
    module "example" {
      source = "path/to/module"

      # Required variables
      region = string
    }
    ```

    ----- stderr -----
     WARN `tfdocs-ext-missing-backend` is not available; using declarations from source only
    "##);

    Ok(())
}

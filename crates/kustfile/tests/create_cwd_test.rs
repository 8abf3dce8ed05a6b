//! Runs `create` against the process working directory, so it lives in its own
//! test binary to keep `set_current_dir` away from other tests.

use std::{fs, path::Path};

use indoc::indoc;
use kustfile::{create, CreateOptions, KustomizationFile};
use tempfile::TempDir;

const SERVICE: &str = indoc! {"
	apiVersion: v1
	kind: Service
	metadata:
	  name: test
"};

fn write(root: &Path, name: &str, contents: &str) {
	let path = root.join(name);
	fs::create_dir_all(path.parent().unwrap()).unwrap();
	fs::write(path, contents).unwrap();
}

#[test]
fn test_create_in_current_directory() {
	let temp = TempDir::new().unwrap();
	let app = temp.path().join("app");
	write(&app, "test.yaml", SERVICE);
	write(&app, "README.md", "# Not a k8s resource\n");
	write(&app, "sub/test.yaml", SERVICE);
	write(&app, "overlay/test.yaml", SERVICE);
	write(&app, "overlay/kustomization.yaml", "resources:\n- test.yaml\n");
	fs::create_dir_all(temp.path().join("base")).unwrap();

	std::env::set_current_dir(&app).unwrap();

	let created = create(
		CreateOptions::builder()
			.resources(vec!["./test.yaml".to_string(), "../base".to_string()])
			.detect(true)
			.recursive(true)
			.build(),
	)
	.unwrap();

	let expected = vec!["test.yaml", "../base", "overlay", "sub/test.yaml"];
	assert_eq!(created.resources, expected);

	let read = KustomizationFile::open(Path::new(".")).unwrap().read().unwrap();
	assert_eq!(read.resources, expected);
	assert!(app.join("kustomization.yaml").is_file());
}

mod common;

use std::{collections::BTreeMap, io, path::PathBuf, sync::Arc};

use common::{discard_logger, ScriptedRunner};
use zetta_ctl::{properties::PropertyError,
                zfs::{CreateDatasetRequest, DatasetKind, DestroyFlags, Error, ErrorKind, ValidationError,
                      ZfsEngine, ZfsOpen3}};

fn zfs(runner: &Arc<ScriptedRunner>) -> ZfsOpen3 {
    ZfsOpen3::new().with_cmd("zfs").with_logger(&discard_logger()).with_runner(runner.clone())
}

static TANK_HOME: &[u8] = b"tank/home\ttype\tfilesystem\t-
tank/home\tcreation\t1651487760\t-
tank/home\tused\t10737418240\t-
tank/home\tavailable\t84G\t-
tank/home\tquota\t-\tdefault
tank/home\tmountpoint\t/usr/home\tlocal
tank/home\tcompression\tlz4\tinherited from tank
tank/home\tcompressratio\t1.45x\t-
tank/home\tatime\toff\tlocal
tank/home\tmounted\tyes\t-
tank/home\tcopies\t1\tdefault
tank/home\tcom.example:owner\talice\tlocal
";

#[test]
fn get_property() {
    let runner = ScriptedRunner::new();
    runner.stdout(b"10G\n");

    let value = zfs(&runner).get_dataset_property("tank/home", "quota").unwrap();

    assert_eq!("10G", value);
    assert_eq!(vec!["zfs"], runner.programs());
    assert_eq!(vec!["get", "-Hp", "-o", "value", "quota", "tank/home"], runner.single_call());
}

#[test]
fn get_property_empty_output() {
    let runner = ScriptedRunner::new();
    runner.stdout(b"");

    assert_eq!("", zfs(&runner).get_dataset_property("tank/home", "quota").unwrap());
}

#[test]
fn get_property_rejects_bad_names() {
    let runner = ScriptedRunner::new();
    let zfs = zfs(&runner);

    let err = zfs.get_dataset_property("tank/home", "all").unwrap_err();
    assert_eq!(Error::InvalidProperty(PropertyError::Reserved(String::from("all"))), err);
    let err = zfs.get_dataset_property("tank/home", "").unwrap_err();
    assert_eq!(ErrorKind::InvalidProperty, err.kind());
    let err = zfs.get_dataset_property("/tank", "quota").unwrap_err();
    assert_eq!(Error::InvalidName(ValidationError::MissingPool(String::from("/tank"))), err);

    assert!(runner.calls().is_empty());
}

#[test]
fn set_property() {
    let runner = ScriptedRunner::new();

    zfs(&runner).set_dataset_property("tank/my-dataset", "quota", "10G").unwrap();

    assert_eq!(vec!["set", "quota=10G", "tank/my-dataset"], runner.single_call());
}

#[test]
fn set_property_rejects_all() {
    let runner = ScriptedRunner::new();

    let err = zfs(&runner).set_dataset_property("tank/my-dataset", "all", "on").unwrap_err();

    assert_eq!(ErrorKind::InvalidProperty, err.kind());
    assert!(runner.calls().is_empty());
}

#[test]
fn set_properties_sorted() {
    let runner = ScriptedRunner::new();
    let mut properties = BTreeMap::new();
    properties.insert("quota", "10G");
    properties.insert("feature@async_destroy", "disabled");

    zfs(&runner).set_dataset_properties("tank/my-dataset", properties).unwrap();

    assert_eq!(
        vec!["set", "feature@async_destroy=disabled", "quota=10G", "tank/my-dataset"],
        runner.single_call()
    );
}

#[test]
fn set_properties_unsorted_input() {
    let runner = ScriptedRunner::new();

    zfs(&runner)
        .set_dataset_properties("tank/my-dataset", vec![("sync", "disabled"), ("atime", "off")])
        .unwrap();

    assert_eq!(vec!["set", "atime=off", "sync=disabled", "tank/my-dataset"], runner.single_call());
}

#[test]
fn set_properties_empty() {
    let runner = ScriptedRunner::new();
    let properties: Vec<(&str, &str)> = Vec::new();

    let err = zfs(&runner).set_dataset_properties("tank/my-dataset", properties).unwrap_err();

    assert_eq!(Error::InvalidProperty(PropertyError::NoProperties), err);
    assert!(runner.calls().is_empty());
}

#[test]
fn inherit_property() {
    let runner = ScriptedRunner::new();
    let zfs = zfs(&runner);

    zfs.inherit_dataset_property("tank/home", "compression", false).unwrap();
    zfs.inherit_dataset_property("tank/home", "com.example:owner", true).unwrap();

    assert_eq!(
        vec![
            vec!["inherit", "compression", "tank/home"],
            vec!["inherit", "-r", "com.example:owner", "tank/home"],
        ],
        runner.calls()
    );
}

#[test]
fn inherit_empty_property() {
    let runner = ScriptedRunner::new();

    let err = zfs(&runner).inherit_dataset_property("tank/home", "", true).unwrap_err();

    assert_eq!(Error::InvalidProperty(PropertyError::EmptyName), err);
    assert!(runner.calls().is_empty());
}

#[test]
fn create_filesystem() {
    let runner = ScriptedRunner::new();
    let request = CreateDatasetRequest::builder()
        .name("tank/home/alice")
        .create_parents(true)
        .unmounted(true)
        .property("mountpoint", "/usr/home/alice")
        .property("compression", "lz4")
        .block_size("8K")
        .sparse(true)
        .build()
        .unwrap();

    zfs(&runner).create_dataset(&request).unwrap();

    assert_eq!(
        vec![
            "create", "-p", "-u", "-o", "compression=lz4", "-o", "mountpoint=/usr/home/alice", "tank/home/alice",
        ],
        runner.single_call()
    );
}

#[test]
fn create_volume() {
    let runner = ScriptedRunner::new();
    let request = CreateDatasetRequest::builder()
        .name("tank/vm/disk0")
        .volume_size("10G")
        .block_size("16K")
        .sparse(true)
        .unmounted(true)
        .property("volmode", "dev")
        .build()
        .unwrap();

    zfs(&runner).create_dataset(&request).unwrap();

    assert_eq!(
        vec!["create", "-b", "16K", "-s", "-o", "volmode=dev", "-V", "10G", "tank/vm/disk0"],
        runner.single_call()
    );
}

#[test]
fn create_missing_parent() {
    let runner = ScriptedRunner::new();
    runner.fail(1, b"cannot create 'tank/my-dataset/foo/bar': parent does not exist\n");
    let request = CreateDatasetRequest::builder().name("tank/my-dataset/foo/bar").build().unwrap();

    let err = zfs(&runner).create_dataset(&request).unwrap_err();

    assert_eq!(Error::DatasetNotFound(String::from("tank/my-dataset/foo/bar")), err);
    assert!(err.is_not_found());
}

#[test]
fn create_invalid_name() {
    let runner = ScriptedRunner::new();
    let request = CreateDatasetRequest::builder().name("tank/").build().unwrap();

    let err = zfs(&runner).create_dataset(&request).unwrap_err();

    assert_eq!(ErrorKind::InvalidName, err.kind());
    assert!(runner.calls().is_empty());
}

#[test]
fn get_dataset() {
    let runner = ScriptedRunner::new();
    runner.stdout(TANK_HOME);

    let dataset = zfs(&runner).get_dataset("tank/home", &[]).unwrap();

    assert_eq!(
        vec!["get", "-Hp", "-o", "name,property,value,source", "all", "tank/home"],
        runner.single_call()
    );
    assert_eq!("tank/home", dataset.name());
    assert_eq!(12, dataset.len());
    assert_eq!(Some(DatasetKind::Filesystem), dataset.kind());
    assert_eq!(Some(1_651_487_760), dataset.creation().map(|creation| creation.timestamp()));
    assert_eq!(Some(10_737_418_240), dataset.used());
    assert_eq!(Some(90_194_313_216), dataset.available());
    assert_eq!(None, dataset.quota());
    assert_eq!(Some(PathBuf::from("/usr/home")), dataset.mountpoint());
    assert_eq!(Some("lz4"), dataset.compression());
    assert_eq!(Some(1.45), dataset.compress_ratio());
    assert_eq!(Some(false), dataset.atime());
    assert_eq!(Some(true), dataset.mounted());
    assert_eq!(Some(1), dataset.copies());
    assert_eq!(Some("alice"), dataset.string("com.example:owner"));
    assert_eq!(Some("inherited from tank"), dataset.get("compression").map(|p| p.source().as_str()));
}

#[test]
fn get_dataset_selected_properties() {
    let runner = ScriptedRunner::new();
    runner.stdout(b"tank/home\tmountpoint\tnone\tlocal\ntank/home\tquota\t0\tdefault\n");

    let dataset = zfs(&runner).get_dataset("tank/home", &["mountpoint", "quota"]).unwrap();

    assert_eq!(
        vec!["get", "-Hp", "-o", "name,property,value,source", "mountpoint,quota", "tank/home"],
        runner.single_call()
    );
    assert_eq!(Some(PathBuf::new()), dataset.mountpoint());
    assert_eq!(Some(0), dataset.quota());
    assert_eq!(None, dataset.kind());
}

#[test]
fn get_dataset_no_output() {
    let runner = ScriptedRunner::new();
    runner.stdout(b"\n");

    let dataset = zfs(&runner).get_dataset("tank/home", &[]).unwrap();

    assert_eq!("tank/home", dataset.name());
    assert!(dataset.properties().is_empty());
    assert_eq!(None, dataset.used());
}

#[test]
fn get_dataset_not_found() {
    let runner = ScriptedRunner::new();
    runner.fail(1, b"cannot open 'tank/my-other-dataset': dataset does not exist\n");

    let err = zfs(&runner).get_dataset("tank/my-other-dataset", &[]).unwrap_err();

    assert_eq!(Error::DatasetNotFound(String::from("tank/my-other-dataset")), err);
}

#[test]
fn get_dataset_pool_not_found() {
    let runner = ScriptedRunner::new();
    runner.fail(1, b"cannot open 'tankz/my-dataset': no such pool 'tankz'\n");

    let err = zfs(&runner).get_dataset("tankz/my-dataset", &[]).unwrap_err();

    match err {
        Error::PoolNotFound(name) => assert_eq!("tankz", name),
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn command_failed_keeps_code_and_stderr() {
    let runner = ScriptedRunner::new();
    runner.fail(
        2,
        b"cannot set property for 'tank/home': 'sync' must be one of 'standard | always | disabled'\nusage:\n\tset <property=value> ... <filesystem|volume|snapshot> ...\n",
    );

    let err = zfs(&runner).set_dataset_property("tank/home", "sync", "sometimes").unwrap_err();

    match err {
        Error::CommandFailed(code, stderr) => {
            assert_eq!(Some(2), code);
            assert_eq!("cannot set property for 'tank/home': 'sync' must be one of 'standard | always | disabled'", stderr);
        },
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn list_datasets() {
    let runner = ScriptedRunner::new();
    runner.stdout(
        b"tank/usr\tused\t2048\t-\ntank\tused\t4096\t-\ntank/usr\ttype\tfilesystem\t-\ntank\ttype\tfilesystem\t-\ntank/vol\tused\t1024\t-\ntank/vol\ttype\tvolume\t-\n",
    );

    let datasets = zfs(&runner).list_datasets(None, 0, DatasetKind::All, &["used", "type"]).unwrap();

    assert_eq!(
        vec!["get", "-Hp", "-o", "name,property,value,source", "-r", "-t", "all", "used,type"],
        runner.single_call()
    );
    let names: Vec<&str> = datasets.iter().map(|dataset| dataset.name().as_str()).collect();
    assert_eq!(vec!["tank", "tank/usr", "tank/vol"], names);
    assert_eq!(Some(4096), datasets[0].used());
    assert_eq!(Some(2048), datasets[1].used());
    assert_eq!(Some(DatasetKind::Volume), datasets[2].kind());
    assert!(datasets.iter().all(|dataset| dataset.len() == 2));
}

#[test]
fn list_datasets_filtered() {
    let runner = ScriptedRunner::new();
    let zfs = zfs(&runner);

    let types = DatasetKind::join(vec![DatasetKind::Filesystem, DatasetKind::Volume]);
    let datasets = zfs.list_datasets(Some("tank/usr"), 1, types, &[]).unwrap();
    zfs.list_datasets(Some(""), 2, DatasetKind::Snapshot, &[]).unwrap();

    assert!(datasets.is_empty());
    assert_eq!(
        vec![
            vec![
                "get",
                "-Hp",
                "-o",
                "name,property,value,source",
                "-d",
                "1",
                "-t",
                "filesystem,volume",
                "all",
                "tank/usr",
            ],
            vec!["get", "-Hp", "-o", "name,property,value,source", "-d", "2", "-t", "snapshot", "all"],
        ],
        runner.calls()
    );
}

#[test]
fn list_dataset_names() {
    let runner = ScriptedRunner::new();
    runner.stdout(b"tank\ntank/usr\ntank/usr/home\n");

    let names = zfs(&runner).list_dataset_names(Some("tank"), 0, DatasetKind::Filesystem).unwrap();

    assert_eq!(vec!["list", "-H", "-o", "name", "-r", "-t", "filesystem", "tank"], runner.single_call());
    assert_eq!(vec!["tank", "tank/usr", "tank/usr/home"], names);
}

#[test]
fn destroy() {
    let runner = ScriptedRunner::new();
    let zfs = zfs(&runner);

    zfs.destroy_dataset("tank/home", DestroyFlags::empty()).unwrap();
    zfs.destroy_dataset("tank/home", DestroyFlags::FORCE_UNMOUNT | DestroyFlags::RECURSIVE).unwrap();
    zfs.destroy_dataset("tank/home@snap", DestroyFlags::all()).unwrap();

    assert_eq!(
        vec![
            vec!["destroy", "tank/home"],
            vec!["destroy", "-r", "-f", "tank/home"],
            vec!["destroy", "-r", "-R", "-d", "-f", "tank/home@snap"],
        ],
        runner.calls()
    );
}

#[test]
fn command_not_found() {
    let runner = ScriptedRunner::new();
    runner.spawn_error(io::ErrorKind::NotFound);
    runner.spawn_error(io::ErrorKind::PermissionDenied);
    let zfs = zfs(&runner);

    assert_eq!(ErrorKind::CmdNotFound, zfs.get_dataset("tank", &[]).unwrap_err().kind());
    assert_eq!(ErrorKind::Io, zfs.get_dataset("tank", &[]).unwrap_err().kind());
}

#[test]
fn command_not_found_system_runner() {
    let zfs = ZfsOpen3::new().with_cmd("/nonexistent/zetta-ctl/zfs").with_logger(&discard_logger());

    let err = zfs.list_dataset_names(None, 0, DatasetKind::All).unwrap_err();

    assert_eq!(Error::CmdNotFound, err);
}

#[test]
fn custom_command() {
    let runner = ScriptedRunner::new();
    let zfs = ZfsOpen3::new().with_cmd("/sbin/zfs").with_logger(&discard_logger()).with_runner(runner.clone());

    zfs.destroy_dataset("tank/home", DestroyFlags::default()).unwrap();

    assert_eq!(vec!["/sbin/zfs"], runner.programs());
}

//! End-to-end packaging tests: array in, archive out, archive read back

use std::fs;
use std::io::{Cursor, Read};

use ndarray::Array3;
use vtkjs_volume::{
    archive::find_entry, build_package, read_archive, ByteOrder, ConverterConfig, DataType,
    Encoding, ImageDataDescriptor, NdArray, PackError, Scalar, VolumeConverter, WireType,
    INDEX_ENTRY, PAYLOAD_ENTRY,
};
use zip::ZipArchive;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

fn parse_index(archive: &[u8]) -> (ImageDataDescriptor, serde_json::Value) {
    let entries = read_archive(archive).expect("Failed to read archive");
    let index = find_entry(&entries, INDEX_ENTRY).expect("index.json missing");
    let text = std::str::from_utf8(&index.bytes).expect("index.json is not UTF-8");
    (
        serde_json::from_str(text).expect("index.json does not match the schema"),
        serde_json::from_str(text).expect("index.json is not JSON"),
    )
}

#[test]
fn test_demo_volume_end_to_end() {
    init_tracing();

    let array = NdArray::from_shape_vec(vec![2, 2, 2], (0u8..8).collect()).unwrap();
    let archive = build_package(&array, "demo").unwrap();

    let entries = read_archive(&archive).unwrap();
    assert_eq!(entries.len(), 2);

    let (descriptor, _) = parse_index(&archive);
    assert_eq!(descriptor.metadata.name, "demo");
    assert_eq!(descriptor.extent, vec![0, 1, 0, 1, 0, 1]);

    let scalars = descriptor.scalars().unwrap();
    assert_eq!(scalars.size, 8);
    assert_eq!(scalars.data_type, WireType::Uint8Array);
    assert_eq!(scalars.ranges[0].min, Scalar::Integer(0));
    assert_eq!(scalars.ranges[0].max, Scalar::Integer(7));

    let payload = find_entry(&entries, PAYLOAD_ENTRY).unwrap();
    assert_eq!(payload.bytes.len(), 8);
    // original[0,0,1] == 1 lands at reordered[1,0,0], flat index 4
    assert_eq!(payload.bytes[4], 1);
    assert_eq!(payload.bytes.as_ref(), &[0, 4, 2, 6, 1, 5, 3, 7]);
}

#[test]
fn test_index_conforms_to_schema() {
    let array = NdArray::from_shape_vec(vec![3, 1, 2], vec![1.5f32, -2.0, 0.0, 4.0, 8.0, 2.5]).unwrap();
    let archive = build_package(&array, "schema").unwrap();
    let (_, json) = parse_index(&archive);

    assert_eq!(json["vtkClass"], "vtkImageData");
    assert_eq!(json["metadata"]["name"], "schema");
    assert_eq!(json["extent"].as_array().unwrap().len(), 6);
    assert_eq!(json["origin"], serde_json::json!([0.0, 0.0, 0.0]));
    assert_eq!(json["spacing"], serde_json::json!([1.0, 1.0, 1.0]));
    assert_eq!(json["pointData"]["vtkClass"], "vtkDataSetAttributes");

    let arrays = json["pointData"]["arrays"].as_array().unwrap();
    assert_eq!(arrays.len(), 1);
    let data = &arrays[0]["data"];
    assert_eq!(data["numberOfComponents"], 1);
    assert_eq!(data["name"], "ImageFile");
    assert_eq!(data["vtkClass"], "vtkDataArray");
    assert_eq!(data["dataType"], "Float32Array");
    assert_eq!(data["ranges"][0]["min"], -2.0);
    assert_eq!(data["ranges"][0]["max"], 8.0);
    assert!(data["ranges"][0]["component"].is_null());
    assert_eq!(data["ref"]["registration"], "setScalars");
    assert_eq!(data["ref"]["id"], "volume");
    assert_eq!(data["ref"]["basepath"], "data");
    assert_eq!(data["ref"]["encode"], Encoding::host().as_str());
    assert_eq!(data["size"], 6);
}

#[test]
fn test_payload_length_matches_element_width() {
    let shapes_and_types = [
        (DataType::I8, 1),
        (DataType::U16, 2),
        (DataType::I32, 4),
        (DataType::F64, 8),
    ];

    for (data_type, width) in shapes_and_types {
        let count = 3 * 4 * 5;
        let array = NdArray::from_bytes(
            vec![3, 4, 5],
            data_type,
            ByteOrder::Native,
            vec![0u8; count * width],
        )
        .unwrap();

        let archive = build_package(&array, "widths").unwrap();
        let entries = read_archive(&archive).unwrap();
        let payload = find_entry(&entries, PAYLOAD_ENTRY).unwrap();
        assert_eq!(payload.bytes.len(), count * width, "{}", data_type);
    }
}

#[test]
fn test_big_endian_source_keeps_its_encoding() {
    let original = Array3::from_shape_fn((2, 3, 4), |(i, j, k)| (i * 100 + j * 10 + k) as i32);
    let buffer: Vec<u8> = original.iter().flat_map(|v| v.to_be_bytes()).collect();
    let array = NdArray::from_bytes(vec![2, 3, 4], DataType::I32, ByteOrder::Big, buffer).unwrap();

    let archive = build_package(&array, "be").unwrap();
    let (descriptor, _) = parse_index(&archive);
    assert_eq!(
        descriptor.scalars().unwrap().reference.encode,
        Encoding::BigEndian
    );

    let entries = read_archive(&archive).unwrap();
    let payload = find_entry(&entries, PAYLOAD_ENTRY).unwrap();
    let reordered = NdArray::from_bytes(
        vec![4, 3, 2],
        DataType::I32,
        ByteOrder::Big,
        payload.bytes.clone(),
    )
    .unwrap()
    .to_ndarray::<i32>()
    .unwrap();

    for ((i, j, k), value) in original.indexed_iter() {
        assert_eq!(reordered[[k, j, i]], *value);
    }
}

#[test]
fn test_archive_written_to_disk() {
    let temp_dir = tempfile::tempdir().unwrap();
    let path = temp_dir.path().join("data.zip");

    let array = NdArray::from_shape_vec(vec![4, 4, 4], (0u16..64).collect()).unwrap();
    let converter =
        VolumeConverter::new(ConverterConfig::default().with_pretty_metadata(true)).unwrap();
    fs::write(&path, converter.build_package(&array, "disk").unwrap()).unwrap();

    let mut zip = ZipArchive::new(fs::File::open(&path).unwrap()).unwrap();
    assert_eq!(zip.len(), 2);

    let mut index = String::new();
    zip.by_name(INDEX_ENTRY)
        .unwrap()
        .read_to_string(&mut index)
        .unwrap();
    assert!(index.contains('\n'));

    let mut payload = Vec::new();
    zip.by_name(PAYLOAD_ENTRY)
        .unwrap()
        .read_to_end(&mut payload)
        .unwrap();
    assert_eq!(payload.len(), 64 * 2);
}

#[test]
fn test_failures_produce_no_archive() {
    let unsupported = NdArray::from_shape_vec(vec![2, 1, 1], vec![1u64, 2]).unwrap();
    assert!(matches!(
        build_package(&unsupported, "u64"),
        Err(PackError::UnsupportedType(DataType::U64))
    ));

    let empty = NdArray::from_shape_vec(vec![0, 3, 3], Vec::<f32>::new()).unwrap();
    assert!(matches!(
        build_package(&empty, "empty"),
        Err(PackError::InvalidArray(_))
    ));

    let four_d = NdArray::from_shape_vec(vec![1, 1, 1, 1], vec![1u8]).unwrap();
    assert!(matches!(
        build_package(&four_d, "4d"),
        Err(PackError::UnsupportedDimensionality(4))
    ));
}

#[test]
fn test_input_array_is_not_modified() {
    let array =
        NdArray::from_shape_vec(vec![1, 1, 3], vec![f64::NAN, f64::INFINITY, 2.0]).unwrap();
    let before = array.as_bytes().to_vec();

    let archive = build_package(&array, "nan").unwrap();
    assert_eq!(array.as_bytes(), before.as_slice());

    let mut zip = ZipArchive::new(Cursor::new(archive.as_ref())).unwrap();
    let mut payload = Vec::new();
    zip.by_name(PAYLOAD_ENTRY)
        .unwrap()
        .read_to_end(&mut payload)
        .unwrap();
    let values = NdArray::from_bytes(vec![3, 1, 1], DataType::F64, ByteOrder::Native, payload)
        .unwrap()
        .to_vec::<f64>()
        .unwrap();
    assert_eq!(values, vec![0.0, f64::MAX, 2.0]);
}

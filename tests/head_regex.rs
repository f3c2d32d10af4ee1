use qiniulog_parser::{HeadMatcher, Schema};

const CASES: [(&str, bool); 8] = [
    ("2017/03/28 15:41:06 [Wm0AAPg-IUMW-68U][INFO] bdc.go:573: deleted: 67608", true),
    ("2016/10/20 17:30:21.433423 [GE2owHck-Y4IWJHS][WARN] github.com/qiniu/http/rpcutil.v1/rpc_util.go:203:  ==> qiniu.com/streaming.v2/apiserver.go:1367: E18102: The specified repo does not exist under the provided appid ~", true),
    (r#"[GE2owHck-Y4IWJHS]{"error":"No 	 such \t entry","reqid":"","details":null,"code":612}"#, false),
    ("2016/10/20 18:20:30.642666 [ERROR] github.com/qiniu/logkit/queue/disk.go:241: DISKQUEUE(stream_local_save): readOne() error", true),
    ("2016/10/20 17:20:30.642666 [GE2owHck-Y4IWJHS][INFO] disk.go github.com/qiniu/logkit/queue/disk.go:241: hello", true),
    ("2016-10-20 17:20:30.642666 [GE2owHck-Y4IWJHS][INFO] disk.go github.com/qiniu/logkit/queue/disk.go:241: hello", false),
    ("hello", false),
    ("1234567/12/12e ax.log go", false),
];

#[test]
fn head_lines_without_prefix() {
    let matcher = HeadMatcher::compile(&Schema::default()).unwrap();
    for (line, expected) in CASES {
        assert_eq!(matcher.is_head(line), expected, "line: {:?}", line);
    }
}

#[test]
fn head_lines_with_prefix() {
    let schema = Schema::new(Schema::default().fields().to_vec(), Some("QINIU".to_string())).unwrap();
    let matcher = HeadMatcher::compile(&schema).unwrap();

    for (line, expected) in CASES {
        let prefixed = format!("QINIU {}", line);
        assert_eq!(matcher.is_head(&prefixed), expected, "line: {:?}", prefixed);
        // 缺少前缀时一律不匹配
        assert!(!matcher.is_head(line), "line: {:?}", line);
    }
}

#[test]
fn head_fields_for_default_layout() {
    let matcher = HeadMatcher::compile(&Schema::default()).unwrap();
    let head = matcher.captures(CASES[4].0).unwrap();

    assert_eq!(head.date, "2016/10/20");
    assert_eq!(head.time, "17:20:30.642666");
    assert_eq!(head.reqid, "GE2owHck-Y4IWJHS");
    assert_eq!(head.level, "INFO");
    assert_eq!(head.file, "disk.go github.com/qiniu/logkit/queue/disk.go:241:");
    assert_eq!(head.remainder, "hello");
}

#[test]
fn schema_decides_single_opaque_bracket() {
    // 只声明了 reqid 时，单个方括号一律归 reqid
    let schema = Schema::new(Schema::parse_headers("date,time,reqid,file").unwrap(), None).unwrap();
    let matcher = HeadMatcher::compile(&schema).unwrap();
    let head = matcher.captures("2017/03/28 15:41:06 [ERROR] a.go:1: x").unwrap();
    assert_eq!(head.reqid, "ERROR");
    assert_eq!(head.level, "");
}

#[test]
fn compiled_pattern_is_anchored() {
    let matcher = HeadMatcher::compile(&Schema::default()).unwrap();
    assert!(matcher.as_str().starts_with("(?s)^"));
    assert!(!matcher.is_head("xx 2017/03/28 15:41:06 [INFO] a.go:1: x"));
}

#[test]
fn non_ascii_digits_never_form_a_head() {
    let matcher = HeadMatcher::compile(&Schema::default()).unwrap();
    for line in [
        "2０１７/0３/2٨ 1５:41:06 [INFO] a.go:1: x",
        "2017/03/28 1５:41:06 [INFO] a.go:1: x",
        "٢٠١٧/03/28 15:41:06 [INFO] a.go:1: x",
    ] {
        assert!(!matcher.is_head(line), "line: {:?}", line);
    }
}

#[test]
fn head_stops_at_embedded_newline() {
    let matcher = HeadMatcher::compile(&Schema::default()).unwrap();
    let head = matcher.captures("2017/03/28 15:41:06\n[INFO] a.go:1: x").unwrap();
    assert_eq!(head.level, "");
    assert_eq!(head.file, "");
    assert_eq!(head.remainder, "[INFO] a.go:1: x");
    assert!(!matcher.is_head("2017/03/28 15:41:06[INFO]a.go:1: x"));
}

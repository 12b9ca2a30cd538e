use image::{ImageBuffer, Rgba};
use lsb_cloak::{
    analysis::ImageReport,
    cli::{HideArgs, InspectArgs, RecoverArgs},
    handler::{handle_hide, handle_inspect, handle_recover},
};
use rand::RngCore;
use std::fs;
use std::path::Path;
use tempfile::tempdir;

/// 一个辅助函数，用于创建一个带有随机像素的测试图像
fn create_test_image(path: &Path, width: u32, height: u32) {
    let mut img_buf = ImageBuffer::new(width, height);
    let mut raw_pixels = vec![0u8; (width * height * 4) as usize];
    rand::rng().fill_bytes(&mut raw_pixels);

    img_buf
        .pixels_mut()
        .zip(raw_pixels.chunks_exact(4))
        .for_each(|(pixel, chunk)| {
            *pixel = Rgba([chunk[0], chunk[1], chunk[2], 255]);
        });

    img_buf.save(path).expect("Failed to create test image.");
}

fn hide_args(image: &Path, message: &str, dest: Option<&Path>, password: &str) -> HideArgs {
    HideArgs {
        image: image.to_path_buf(),
        message: Some(message.to_string()),
        file: None,
        dest: dest.map(Path::to_path_buf),
        password: password.to_string(),
        force: false,
    }
}

fn recover_args(image: &Path, output: Option<&Path>, password: &str) -> RecoverArgs {
    RecoverArgs {
        image: image.to_path_buf(),
        password: password.to_string(),
        output: output.map(Path::to_path_buf),
        force: false,
    }
}

/// 验证从隐藏到恢复的完整流程
#[test]
fn test_handle_hide_and_recover_integration() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let hidden_image_path = dir.path().join("hidden.png");
    let recovered_text_path = dir.path().join("recovered.txt");

    create_test_image(&original_image_path, 100, 100);
    let original_text = "This is a test message for the handler!";

    // 2. 测试 handle_hide
    handle_hide(hide_args(
        &original_image_path,
        original_text,
        Some(&hidden_image_path),
        "abc123",
    ))?;
    assert!(
        hidden_image_path.exists(),
        "Hidden image should be created."
    );

    // 3. 测试 handle_recover
    handle_recover(recover_args(
        &hidden_image_path,
        Some(&recovered_text_path),
        "abc123",
    ))?;
    assert!(
        recovered_text_path.exists(),
        "Recovered text file should be created."
    );

    // 4. 验证结果
    let recovered_text = fs::read_to_string(&recovered_text_path)?;
    assert_eq!(
        original_text, recovered_text,
        "Recovered text must match the original."
    );

    Ok(())
}

/// 验证隐藏文件时，默认输出路径的生成以及文件名的恢复
#[test]
fn test_hide_and_recover_file_with_defaults() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let original_image_path = dir.path().join("original.png");
    let source_dir = dir.path().join("source");
    fs::create_dir(&source_dir)?;
    let source_file_path = source_dir.join("report.bin");

    create_test_image(&original_image_path, 100, 100);
    let content: Vec<u8> = (0u8..=250).collect();
    fs::write(&source_file_path, &content)?;

    // 2. 测试 handle_hide，不提供 dest 路径
    handle_hide(HideArgs {
        image: original_image_path.clone(),
        message: None,
        file: Some(source_file_path),
        dest: None,
        password: String::new(),
        force: false,
    })?;

    // 验证默认的隐藏图像文件是否已创建
    let expected_hidden_path = dir.path().join("original_embedded.png");
    assert!(
        expected_hidden_path.exists(),
        "Default hidden image should be created at: {:?}",
        expected_hidden_path
    );

    // 3. 测试 handle_recover，不提供输出路径
    handle_recover(recover_args(&expected_hidden_path, None, ""))?;

    // 恢复的文件应沿用原文件名，保存在图像所在目录
    let expected_recovered_path = dir.path().join("report.bin");
    assert!(
        expected_recovered_path.exists(),
        "Recovered file should be created at: {:?}",
        expected_recovered_path
    );

    // 4. 验证结果
    assert_eq!(fs::read(&expected_recovered_path)?, content);

    Ok(())
}

/// 验证覆盖保护机制以及 `--force` 标志是否按预期工作
#[test]
fn test_overwrite_protection_and_force_flag() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("image.png");
    let dest_path = dir.path().join("dest.png");

    create_test_image(&image_path, 50, 50);

    // 2. 场景一：测试覆盖保护
    fs::write(&dest_path, "this is a dummy file to be overwritten")?;
    assert!(dest_path.exists());

    let result = handle_hide(hide_args(&image_path, "some text", Some(&dest_path), ""));
    assert!(
        result.is_err(),
        "Execution should fail without --force when file exists."
    );
    if let Err(e) = result {
        assert!(e.to_string().contains("Output file already exists"));
    }

    // 3. 场景二：测试强制覆盖
    let mut forced = hide_args(&image_path, "some text", Some(&dest_path), "");
    forced.force = true;
    let result = handle_hide(forced);
    assert!(
        result.is_ok(),
        "Execution should succeed with --force when file exists."
    );

    let dummy_content = fs::read(&dest_path)?;
    assert_ne!(dummy_content, b"this is a dummy file to be overwritten");

    Ok(())
}

/// 验证空间不足时的错误处理，且不会写出任何文件
#[test]
fn test_handle_hide_not_enough_space() -> anyhow::Result<()> {
    // 1. 准备环境
    let dir = tempdir()?;
    let image_path = dir.path().join("small.png");
    let dest_path = dir.path().join("dest.png");

    // 创建一个非常小的图片
    create_test_image(&image_path, 10, 10);
    let original_bytes = fs::read(&image_path)?;
    let large_text = "a".repeat(5000);

    // 2. 执行并断言错误
    let result = handle_hide(hide_args(&image_path, &large_text, Some(&dest_path), ""));

    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Not enough space"));
    }

    // 3. 原图保持不变，目标文件未被创建
    assert!(!dest_path.exists());
    assert_eq!(fs::read(&image_path)?, original_bytes);

    Ok(())
}

/// 验证错误密码与无隐藏数据得到的是同一种提示
#[test]
fn test_wrong_password_reads_as_no_data() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let hidden_path = dir.path().join("hidden.png");
    let recovered_path = dir.path().join("out.txt");

    create_test_image(&image_path, 40, 40);
    handle_hide(hide_args(&image_path, "top secret", Some(&hidden_path), "pw1"))?;

    let result = handle_recover(recover_args(&hidden_path, Some(&recovered_path), "pw2"));
    let message = result.expect_err("wrong password must fail").to_string();
    assert!(message.contains("No hidden data found"));
    assert!(!recovered_path.exists());

    Ok(())
}

/// 验证请求有损扩展名时会改为 PNG 保存
#[test]
fn test_lossy_destination_is_saved_as_png() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let requested = dir.path().join("hidden.jpg");
    let recovered_path = dir.path().join("out.txt");

    create_test_image(&image_path, 30, 30);
    handle_hide(hide_args(&image_path, "lossless only", Some(&requested), ""))?;

    let actual = dir.path().join("hidden.png");
    assert!(!requested.exists());
    assert!(actual.exists());

    handle_recover(recover_args(&actual, Some(&recovered_path), ""))?;
    assert_eq!(fs::read_to_string(&recovered_path)?, "lossless only");

    Ok(())
}

/// 验证 BMP 输出会去掉 alpha 通道，且数据仍可恢复
#[test]
fn test_bmp_destination_round_trip() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let hidden_path = dir.path().join("hidden.bmp");
    let recovered_path = dir.path().join("out.txt");

    create_test_image(&image_path, 30, 30);
    handle_hide(hide_args(&image_path, "bitmap payload", Some(&hidden_path), "k"))?;

    let decoded = image::open(&hidden_path)?;
    assert!(!decoded.color().has_alpha());

    handle_recover(recover_args(&hidden_path, Some(&recovered_path), "k"))?;
    assert_eq!(fs::read_to_string(&recovered_path)?, "bitmap payload");

    Ok(())
}

/// 验证 inspect 子命令可以分析普通图像与隐写后的图像
#[test]
fn test_handle_inspect() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let image_path = dir.path().join("cover.png");
    let hidden_path = dir.path().join("hidden.png");

    create_test_image(&image_path, 20, 20);
    handle_hide(hide_args(&image_path, "inspect me", Some(&hidden_path), ""))?;

    handle_inspect(InspectArgs { image: image_path.clone() })?;
    handle_inspect(InspectArgs {
        image: hidden_path.clone(),
    })?;

    let missing = handle_inspect(InspectArgs {
        image: dir.path().join("missing.png"),
    });
    assert!(missing.is_err());

    // 常见密码保护的数据会被识别出来
    let guarded_path = dir.path().join("guarded.png");
    handle_hide(hide_args(&image_path, "inspect me", Some(&guarded_path), "secret"))?;
    let report = ImageReport::inspect(&guarded_path)?;
    assert_eq!(report.guessed_password, Some("secret"));
    assert!(!report.unprotected_data);
    handle_inspect(InspectArgs {
        image: guarded_path,
    })?;

    let report = ImageReport::inspect(&hidden_path)?;
    assert!(report.unprotected_data);
    assert_eq!(report.guessed_password, None);

    Ok(())
}

//! # 서비스 계층
//!
//! DB 밖의 외부 협력자(오브젝트 저장소)와 상호작용하는 기능을 모아둔 모듈입니다.
//! - `storage`: 이미지 디코딩, 파일 이름 정리, 오브젝트 저장소 업로드

pub mod storage;

pub use storage::*;
